use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, ORIGIN,
    REFERER,
};
use reqwest::{StatusCode, Url};
use std::sync::Arc;
use tracing::{debug, info};
use seatwatch_core::{CoachResponse, SiteError, TicketingSite, TripConfig};
use crate::app_config::SiteConfig;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// One cookie-carrying client; dropped and rebuilt on refresh
pub struct SiteSession {
    client: reqwest::Client,
}

/// reqwest-backed client for the D-Ticket public booking site
pub struct DTicketClient {
    site: SiteConfig,
}

fn header_value(value: &str) -> Result<HeaderValue, SiteError> {
    HeaderValue::from_str(value)
        .map_err(|e| SiteError::Transport(format!("invalid header value {:?}: {}", value, e)))
}

fn transport(err: reqwest::Error) -> SiteError {
    SiteError::Transport(err.to_string())
}

impl DTicketClient {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }

    fn build_client(&self, jar: Arc<Jar>) -> Result<reqwest::Client, SiteError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, header_value(&self.site.accept_language)?);

        reqwest::Client::builder()
            .user_agent(self.site.user_agent.as_str())
            .default_headers(headers)
            .cookie_provider(jar)
            .timeout(self.site.timeout())
            .build()
            .map_err(transport)
    }

    /// Headers the booking page's own XHR sends
    pub fn ajax_headers(&self) -> Result<HeaderMap, SiteError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert(ORIGIN, header_value(&self.site.origin)?);
        headers.insert(REFERER, header_value(&self.site.referer())?);
        headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
        headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
        headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));

        for extra in &self.site.extra_headers {
            let name = HeaderName::from_bytes(extra.name.as_bytes())
                .map_err(|e| SiteError::Transport(format!("invalid header name {:?}: {}", extra.name, e)))?;
            headers.insert(name, header_value(&extra.value)?);
        }

        Ok(headers)
    }

    fn seed_cookies(&self, jar: &Jar) -> Result<usize, SiteError> {
        let url: Url = self
            .site
            .home_url()
            .parse()
            .map_err(|e| SiteError::Transport(format!("invalid site url: {}", e)))?;

        for cookie in &self.site.cookies {
            jar.add_cookie_str(&format!("{}={}; Path=/", cookie.name, cookie.value), &url);
        }
        Ok(self.site.cookies.len())
    }
}

#[async_trait]
impl TicketingSite for DTicketClient {
    type Session = SiteSession;

    async fn open_session(&self) -> Result<SiteSession, SiteError> {
        let jar = Arc::new(Jar::default());
        let client = self.build_client(jar.clone())?;

        let response = client
            .get(self.site.home_url())
            .send()
            .await
            .map_err(transport)?;

        if response.status() != StatusCode::OK {
            return Err(SiteError::Status(response.status().as_u16()));
        }

        let seeded = self.seed_cookies(&jar)?;
        info!("Home page loaded, {} cookies seeded", seeded);

        Ok(SiteSession { client })
    }

    async fn fetch_coaches(
        &self,
        session: &SiteSession,
        trip: &TripConfig,
    ) -> Result<CoachResponse, SiteError> {
        let response = session
            .client
            .post(self.site.coach_url())
            .headers(self.ajax_headers()?)
            .form(&trip.form_fields())
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::INTERNAL_SERVER_ERROR => return Err(SiteError::ServerFault),
            other => return Err(SiteError::Status(other.as_u16())),
        }

        let body = response.text().await.map_err(transport)?;
        debug!("{}: {} bytes of coach data", trip.name, body.len());

        serde_json::from_str(&body).map_err(|e| SiteError::MalformedBody(e.to_string()))
    }
}
