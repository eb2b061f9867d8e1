// SPDX-License-Identifier: MPL-2.0
//! Single-shot dismiss timer.

use std::time::{Duration, Instant};

/// A one-shot deadline. Firing is the caller's job: the event loop checks
/// [`Timer::is_due`] and drops the timer once it has acted on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    deadline: Instant,
}

impl Timer {
    #[must_use]
    pub fn start(now: Instant, duration: Duration) -> Self {
        Self {
            deadline: saturating_add(now, duration),
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// `at + duration`, shortened until it fits when the platform clock
/// cannot represent the sum.
pub(crate) fn saturating_add(at: Instant, duration: Duration) -> Instant {
    let mut step = duration;
    loop {
        if let Some(end) = at.checked_add(step) {
            return end;
        }
        step /= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_becomes_due_at_deadline() {
        let now = Instant::now();
        let timer = Timer::start(now, Duration::from_secs(5));
        assert!(!timer.is_due(now + Duration::from_millis(4999)));
        assert!(timer.is_due(now + Duration::from_secs(5)));
    }

    #[test]
    fn huge_duration_does_not_overflow() {
        let now = Instant::now();
        let timer = Timer::start(now, Duration::MAX);
        assert!(timer.deadline() > now);
        assert!(!timer.is_due(now + Duration::from_secs(3600)));
    }
}
