use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{error, info};
use seatwatch_core::{Notifier, NotifyError};
use crate::app_config::TelegramConfig;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Posts to a single chat through the Bot API `sendMessage` method
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        let token = config.bot_token.as_deref().unwrap_or_default();
        let chat_id = config.chat_id.clone().unwrap_or_default();

        Ok(Self {
            client,
            endpoint: format!("{}/bot{}/sendMessage", config.api_base.trim_end_matches('/'), token),
            chat_id,
        })
    }

    fn payload<'a>(&'a self, text: &'a str) -> SendMessage<'a> {
        SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.payload(text))
            .send()
            .await
            .map_err(|e| {
                error!("Telegram failed: {}", e);
                NotifyError::Transport(e.to_string())
            })?;

        if response.status() != StatusCode::OK {
            error!("Telegram error: {}", response.status());
            return Err(NotifyError::Status(response.status().as_u16()));
        }

        info!("Telegram notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> TelegramConfig {
        TelegramConfig {
            bot_token: Some("123:abc".to_string()),
            chat_id: Some("-1001".to_string()),
            api_base: "https://api.telegram.org/".to_string(),
            timeout_seconds: 10,
        }
    }

    #[test]
    fn test_endpoint_embeds_token() {
        let notifier = TelegramNotifier::new(&config()).unwrap();
        assert_eq!(notifier.endpoint, "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[test]
    fn test_payload_uses_html_parse_mode() {
        let notifier = TelegramNotifier::new(&config()).unwrap();
        let body = serde_json::to_value(notifier.payload("<b>hi</b>")).unwrap();

        assert_eq!(body, json!({ "chat_id": "-1001", "text": "<b>hi</b>", "parse_mode": "HTML" }));
    }
}
