use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification rejected with HTTP {0}")]
    Status(u16),
    #[error("Notification delivery failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one HTML-formatted message. No retry.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
