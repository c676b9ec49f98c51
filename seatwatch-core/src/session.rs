use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};
use crate::site::TicketingSite;

/// The booking site's cookies go stale after roughly this long.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(20 * 60);

struct ActiveSession<T> {
    handle: T,
    created_at: Instant,
}

/// Owns the single browsing session against the booking site.
///
/// A session is either present and younger than `max_age`, or absent. It is
/// never patched in place: refreshing always replaces the whole handle.
pub struct SessionManager<T> {
    current: Option<ActiveSession<T>>,
    max_age: Duration,
    sessions_created: u64,
}

impl<T> SessionManager<T> {
    pub fn new(max_age: Duration) -> Self {
        Self {
            current: None,
            max_age,
            sessions_created: 0,
        }
    }

    /// Session handle, if one is held. Does not check its age.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref().map(|s| &s.handle)
    }

    pub fn is_expired(&self) -> bool {
        self.current
            .as_ref()
            .map(|s| s.created_at.elapsed() > self.max_age)
            .unwrap_or(false)
    }

    /// Drop the session so the next `ensure_valid` builds a fresh one
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    pub fn sessions_created(&self) -> u64 {
        self.sessions_created
    }

    /// Make sure a usable session exists, creating or refreshing as needed.
    ///
    /// Returns false when the site could not be reached; the session is then
    /// left absent.
    pub async fn ensure_valid<S>(&mut self, site: &S) -> bool
    where
        S: TicketingSite<Session = T>,
    {
        if self.current.is_none() {
            return self.create(site).await;
        }

        if self.is_expired() {
            info!("Session expired, refreshing...");
            return self.create(site).await;
        }

        true
    }

    /// Replace the session unconditionally
    pub async fn recreate<S>(&mut self, site: &S) -> bool
    where
        S: TicketingSite<Session = T>,
    {
        self.create(site).await
    }

    async fn create<S>(&mut self, site: &S) -> bool
    where
        S: TicketingSite<Session = T>,
    {
        info!("Creating new session...");
        self.current = None;

        match site.open_session().await {
            Ok(handle) => {
                self.current = Some(ActiveSession {
                    handle,
                    created_at: Instant::now(),
                });
                self.sessions_created += 1;
                info!("Session created (#{})", self.sessions_created);
                true
            }
            Err(e) => {
                error!("Failed to create session: {}", e);
                false
            }
        }
    }
}

impl<T> Default for SessionManager<T> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE)
    }
}
