use std::future::Future;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{error, info, warn};
use seatwatch_core::fetcher::fetch_availability;
use seatwatch_core::message::{availability_message, shutdown_message, startup_message};
use seatwatch_core::{Notifier, TicketingSite, Transition};
use crate::resiliency::FailureCounter;
use crate::state::Monitor;

/// Outcome of one pass over every configured trip
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// No session could be created, so no trip was polled
    pub skipped: bool,
    pub fetched: usize,
    pub failed: usize,
    pub alerts: usize,
    pub session_resets: usize,
}

impl<S: TicketingSite, N: Notifier> Monitor<S, N> {
    /// Deliver a message; failures are logged and otherwise ignored
    pub async fn notify(&self, text: &str) -> bool {
        match self.notifier.send(text).await {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Open the first session and announce what is being watched
    pub async fn start(&mut self) {
        info!("Monitoring {} trips", self.trips.len());
        info!("Check interval: {} minutes", self.settings.check_interval.as_secs() / 60);

        self.sessions.ensure_valid(&self.site).await;

        let message = startup_message(
            &self.settings.search_name,
            &self.trips,
            self.settings.check_interval.as_secs() / 60,
            &chrono::Local::now(),
        );
        self.notify(&message).await;
    }

    /// Poll every trip once, in configured order
    pub async fn run_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::default();
        info!("{}", "=".repeat(50));
        info!("Checking availability...");

        if !self.sessions.ensure_valid(&self.site).await {
            error!("No session, skipping check");
            report.skipped = true;
            return report;
        }

        let mut failures = FailureCounter::new(self.settings.consecutive_failure_limit);

        for trip in &self.trips {
            info!("{}...", trip.name);

            match fetch_availability(&self.site, &mut self.sessions, trip).await {
                None => {
                    report.failed += 1;
                    if failures.record_failure() {
                        warn!("Too many errors, refreshing session...");
                        self.sessions.recreate(&self.site).await;
                        report.session_resets += 1;
                    }
                }
                Some(seats) => {
                    failures.record_success();
                    report.fetched += 1;

                    match self.tracker.update(&trip.trip_id, &seats) {
                        Transition::BecameAvailable { total } => {
                            info!("   {} seats available!", total);
                            let message = availability_message(&self.settings.search_name, &trip.name, &seats);
                            report.alerts += 1;
                            self.notify(&message).await;
                        }
                        Transition::StillAvailable { total, .. } => {
                            info!("   {} seats available! (already notified)", total);
                        }
                        Transition::SeatsGone { previous } => {
                            info!("   No seats");
                            warn!("   Seats gone (were: {})", previous);
                        }
                        Transition::NoSeats => {
                            info!("   No seats");
                        }
                    }
                }
            }

            sleep(self.settings.trip_pause).await;
        }

        info!("Done.");
        info!("{}", "=".repeat(50));
        report
    }

    /// Poll immediately, then on every interval tick. Never returns.
    async fn poll_forever(&mut self) {
        let mut ticker = interval(self.settings.check_interval);
        // A slow cycle pushes the next one back instead of bunching ticks up
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_cycle().await;
            info!("Next check in {} minutes...", self.settings.check_interval.as_secs() / 60);
        }
    }

    /// Start up, poll until `shutdown` resolves, then say goodbye
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.start().await;

        tokio::select! {
            _ = self.poll_forever() => {}
            _ = shutdown => {
                info!("Stopped by user.");
            }
        }

        self.notify(&shutdown_message()).await;
    }
}
