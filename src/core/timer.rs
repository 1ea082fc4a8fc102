//! Inactivity timer for auto-advance.

use std::time::Duration;

/// A single cancellable deadline on the engine's clock.
#[derive(Debug, Clone)]
pub struct AutoAdvanceTimer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl AutoAdvanceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)arm with a fresh delay counted from `now`.
    pub fn arm(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Consume the deadline if it has passed.  Fires at most once per `arm`.
    pub fn fire_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}
