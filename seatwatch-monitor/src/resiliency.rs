/// Counts back-to-back fetch failures within one poll cycle.
///
/// When the streak reaches `threshold` the counter trips, resets itself, and
/// the caller rebuilds the site session. Any success breaks the streak.
#[derive(Debug, Clone)]
pub struct FailureCounter {
    consecutive: usize,
    threshold: usize,
}

impl FailureCounter {
    pub fn new(threshold: usize) -> Self {
        Self {
            consecutive: 0,
            threshold: threshold.max(1),
        }
    }

    pub fn consecutive(&self) -> usize {
        self.consecutive
    }

    /// Returns true when this failure completes a streak of `threshold`
    pub fn record_failure(&mut self) -> bool {
        self.consecutive += 1;
        if self.consecutive >= self.threshold {
            tracing::warn!("{} consecutive fetch failures", self.consecutive);
            self.consecutive = 0;
            return true;
        }
        false
    }

    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }
}
