use std::time::Duration;
use seatwatch_core::session::DEFAULT_MAX_AGE;
use seatwatch_core::{AvailabilityTracker, Notifier, SessionManager, TicketingSite, TripConfig};
use seatwatch_store::app_config::Config;

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub search_name: String,
    pub check_interval: Duration,
    pub trip_pause: Duration,
    pub session_max_age: Duration,
    pub consecutive_failure_limit: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            search_name: "Train trips".to_string(),
            check_interval: Duration::from_secs(5 * 60),
            trip_pause: Duration::from_secs(1),
            session_max_age: DEFAULT_MAX_AGE,
            consecutive_failure_limit: 3,
        }
    }
}

impl From<&Config> for MonitorSettings {
    fn from(config: &Config) -> Self {
        Self {
            search_name: config.monitor.search_name.clone(),
            check_interval: config.monitor.check_interval(),
            trip_pause: config.monitor.trip_pause(),
            session_max_age: config.monitor.session_max_age(),
            consecutive_failure_limit: config.monitor.consecutive_failure_limit,
        }
    }
}

/// Everything the poll loop mutates, owned by the single task running it
pub struct Monitor<S: TicketingSite, N: Notifier> {
    pub(crate) site: S,
    pub(crate) notifier: N,
    pub(crate) sessions: SessionManager<S::Session>,
    pub(crate) tracker: AvailabilityTracker,
    pub(crate) trips: Vec<TripConfig>,
    pub(crate) settings: MonitorSettings,
}

impl<S: TicketingSite, N: Notifier> Monitor<S, N> {
    pub fn new(site: S, notifier: N, trips: Vec<TripConfig>, settings: MonitorSettings) -> Self {
        Self {
            site,
            notifier,
            sessions: SessionManager::new(settings.session_max_age),
            tracker: AvailabilityTracker::new(),
            trips,
            settings,
        }
    }

    pub fn site(&self) -> &S {
        &self.site
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn sessions(&self) -> &SessionManager<S::Session> {
        &self.sessions
    }

    pub fn tracker(&self) -> &AvailabilityTracker {
        &self.tracker
    }
}
