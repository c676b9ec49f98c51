use async_trait::async_trait;
use crate::coach::CoachResponse;
use crate::trip::TripConfig;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// HTTP 500 from the booking site; the session is no longer trusted.
    #[error("Server fault (HTTP 500)")]
    ServerFault,
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Invalid JSON response: {0}")]
    MalformedBody(String),
}

impl SiteError {
    pub fn invalidates_session(&self) -> bool {
        matches!(self, SiteError::ServerFault)
    }
}

/// The remote booking site, as seen by the monitor.
#[async_trait]
pub trait TicketingSite: Send + Sync {
    /// Cookie-carrying browsing context handed back to `fetch_coaches`
    type Session: Send + Sync;

    /// Visit the home page and seed the cookies the AJAX endpoints expect
    async fn open_session(&self) -> Result<Self::Session, SiteError>;

    /// Ask for the coach list of one trip
    async fn fetch_coaches(
        &self,
        session: &Self::Session,
        trip: &TripConfig,
    ) -> Result<CoachResponse, SiteError>;
}
