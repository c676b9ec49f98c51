pub mod app_config;
pub mod site_client;
pub mod telegram;

pub use site_client::{DTicketClient, SiteSession};
pub use telegram::TelegramNotifier;
