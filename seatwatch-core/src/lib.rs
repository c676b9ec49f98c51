pub mod trip;
pub mod coach;
pub mod site;
pub mod session;
pub mod fetcher;
pub mod tracker;
pub mod notify;
pub mod message;

pub use trip::TripConfig;
pub use coach::{CoachResponse, SeatRecord};
pub use site::{SiteError, TicketingSite};
pub use session::SessionManager;
pub use tracker::{AvailabilityTracker, Transition};
pub use notify::{NotifyError, Notifier};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
