use serde::Deserialize;
use std::env;
use std::time::Duration;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use seatwatch_core::TripConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub monitor: MonitorConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub trips: Vec<TripConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    pub api_base: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    pub search_name: String,
    pub check_interval_minutes: u64,
    pub session_max_age_minutes: u64,
    pub trip_pause_millis: u64,
    pub consecutive_failure_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub origin: String,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_seconds: u64,
    /// Cookies captured from a real browser visit, seeded after the home page loads
    #[serde(default)]
    pub cookies: Vec<NamedValue>,
    /// Extra browser fingerprint headers sent with every coach lookup
    #[serde(default)]
    pub extra_headers: Vec<NamedValue>,
}

/// Name/value pair kept as a list entry so the name's case survives loading
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NamedValue {
    pub name: String,
    pub value: String,
}

impl SiteConfig {
    pub fn home_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    pub fn coach_url(&self) -> String {
        format!("{}/booking/booking/getTrainCoach", self.base_url.trim_end_matches('/'))
    }

    pub fn referer(&self) -> String {
        format!("{}/booking/booking", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl MonitorConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_minutes.saturating_mul(60))
    }

    pub fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session_max_age_minutes.saturating_mul(60))
    }

    pub fn trip_pause(&self) -> Duration {
        Duration::from_millis(self.trip_pause_millis)
    }
}

impl TelegramConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in: holds the operator's own token and cookies
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `SEATWATCH__MONITOR__SEARCH_NAME=...`
            .add_source(config::Environment::with_prefix("SEATWATCH").separator("__"))
            // The bare names deployments already export
            .set_override_option("telegram.bot_token", env::var("TELEGRAM_BOT_TOKEN").ok())?
            .set_override_option("telegram.chat_id", env::var("TELEGRAM_CHAT_ID").ok())?
            .set_override_option(
                "monitor.check_interval_minutes",
                env::var("CHECK_INTERVAL_MINUTES").ok(),
            )?;

        Self::build(builder)
    }

    /// Values every layer may override
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("telegram.api_base", "https://api.telegram.org")?
            .set_default("telegram.timeout_seconds", 10)?
            .set_default("monitor.search_name", "Train trips")?
            .set_default("monitor.check_interval_minutes", 5)?
            .set_default("monitor.session_max_age_minutes", 20)?
            .set_default("monitor.trip_pause_millis", 1000)?
            .set_default("monitor.consecutive_failure_limit", 3)?
            .set_default("site.base_url", "https://dticket.railway.co.th/DTicketPublicWeb")?
            .set_default("site.origin", "https://dticket.railway.co.th")?
            .set_default(
                "site.user_agent",
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36",
            )?
            .set_default("site.accept_language", "en-US,en;q=0.9")?
            .set_default("site.timeout_seconds", 30)
    }

    pub fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn bot_token(&self) -> &str {
        self.telegram.bot_token.as_deref().unwrap_or_default()
    }

    pub fn chat_id(&self) -> &str {
        self.telegram.chat_id.as_deref().unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token().trim().is_empty() {
            return Err(ConfigError::Message(
                "TELEGRAM_BOT_TOKEN environment variable is not set".into(),
            ));
        }
        if self.chat_id().trim().is_empty() {
            return Err(ConfigError::Message(
                "TELEGRAM_CHAT_ID environment variable is not set".into(),
            ));
        }
        if self.monitor.check_interval_minutes == 0 {
            return Err(ConfigError::Message("check interval must be at least 1 minute".into()));
        }
        if self.monitor.consecutive_failure_limit == 0 {
            return Err(ConfigError::Message("consecutive failure limit must be at least 1".into()));
        }
        if self.trips.is_empty() {
            return Err(ConfigError::Message("no trips configured".into()));
        }
        for trip in &self.trips {
            trip.validate().map_err(|e| ConfigError::Message(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    const TRIPS: &str = r#"
        [[trips]]
        name = "Trip 1"
        trip_id = "517922"
        province_start_id = "74"
        province_end_id = "1679"
        view_state_holder = "w4SU=="

        [[trips]]
        name = "Trip 2"
        trip_id = "517904"
        province_start_id = "74"
        province_end_id = "1679"
    "#;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        let builder = Config::defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        Config::build(builder)
    }

    #[test]
    fn test_defaults_fill_everything_but_credentials() {
        let toml = format!("[telegram]\nbot_token = \"123:abc\"\nchat_id = \"42\"\n{}", TRIPS);
        let config = from_toml(&toml).unwrap();

        assert_eq!(config.monitor.check_interval(), Duration::from_secs(300));
        assert_eq!(config.monitor.session_max_age(), Duration::from_secs(1200));
        assert_eq!(config.monitor.consecutive_failure_limit, 3);
        assert_eq!(config.telegram.timeout(), Duration::from_secs(10));
        assert_eq!(config.site.timeout(), Duration::from_secs(30));
        assert_eq!(config.trips.len(), 2);
        assert_eq!(config.trips[0].view_state_holder.as_deref(), Some("w4SU=="));
        assert_eq!(config.trips[1].view_state_holder, None);
        assert!(config.site.cookies.is_empty());
    }

    #[test]
    fn test_cookie_names_keep_their_case() {
        let toml = format!(
            "[telegram]\nbot_token = \"t\"\nchat_id = \"c\"\n[[site.cookies]]\nname = \"JSESSIONID\"\nvalue = \"node0abc\"\n{}",
            TRIPS
        );
        let config = from_toml(&toml).unwrap();

        assert_eq!(config.site.cookies, vec![NamedValue {
            name: "JSESSIONID".to_string(),
            value: "node0abc".to_string(),
        }]);
    }

    #[test]
    fn test_huge_minute_values_saturate() {
        let toml = format!(
            "[telegram]\nbot_token = \"t\"\nchat_id = \"c\"\n[monitor]\ncheck_interval_minutes = 9223372036854775807\nsession_max_age_minutes = 9223372036854775807\n{}",
            TRIPS
        );
        let config = from_toml(&toml).unwrap();

        assert_eq!(config.monitor.check_interval(), Duration::from_secs(u64::MAX));
        assert_eq!(config.monitor.session_max_age(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let toml = format!("[telegram]\nchat_id = \"42\"\n{}", TRIPS);
        let err = from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn test_missing_chat_is_fatal() {
        let toml = format!("[telegram]\nbot_token = \"123:abc\"\n{}", TRIPS);
        let err = from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn test_no_trips_is_fatal() {
        let err = from_toml("[telegram]\nbot_token = \"t\"\nchat_id = \"c\"\n").unwrap_err();
        assert!(err.to_string().contains("no trips"));
    }

    #[test]
    fn test_site_urls_derived_from_base() {
        let toml = format!(
            "[telegram]\nbot_token = \"t\"\nchat_id = \"c\"\n[site]\nbase_url = \"https://example.test/Web/\"\n{}",
            TRIPS
        );
        let config = from_toml(&toml).unwrap();

        assert_eq!(config.site.home_url(), "https://example.test/Web/");
        assert_eq!(config.site.coach_url(), "https://example.test/Web/booking/booking/getTrainCoach");
        assert_eq!(config.site.referer(), "https://example.test/Web/booking/booking");
    }
}
