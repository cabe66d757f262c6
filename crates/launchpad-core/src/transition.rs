//! One-shot loading delay between unlock and the dashboard

use std::time::{Duration, Instant};

/// Length of the loading screen
pub const TRANSITION_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { deadline: Instant },
    Done,
    Cancelled,
}

/// Fixed-duration timer that fires once
///
/// After firing or being cancelled it stays inert; a new loading period
/// needs a new `Transition`.
#[derive(Debug, Clone)]
pub struct Transition {
    duration: Duration,
    phase: Phase,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(TRANSITION_DELAY)
    }
}

impl Transition {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            phase: Phase::Idle,
        }
    }

    /// Start the countdown; ignored unless idle
    pub fn start(&mut self, now: Instant) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Running {
                deadline: now + self.duration,
            };
        }
    }

    /// Returns `true` exactly once, when the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Running { deadline } if now >= deadline => {
                self.phase = Phase::Done;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending countdown so it never fires
    pub fn cancel(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::Running { .. }) {
            self.phase = Phase::Cancelled;
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Whether the done signal has been delivered
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Running { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Fraction of the delay elapsed, for progress display
    pub fn progress(&self, now: Instant) -> f64 {
        match self.phase {
            Phase::Idle | Phase::Cancelled => 0.0,
            Phase::Done => 1.0,
            Phase::Running { deadline } => {
                if self.duration.is_zero() {
                    return 1.0;
                }
                let remaining = deadline.saturating_duration_since(now);
                1.0 - remaining.as_secs_f64() / self.duration.as_secs_f64()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_exactly_once() {
        let t0 = Instant::now();
        let mut transition = Transition::default();
        assert!(!transition.poll(t0 + Duration::from_secs(10)));

        transition.start(t0);
        assert!(!transition.poll(t0 + Duration::from_millis(1999)));
        assert!(transition.poll(t0 + TRANSITION_DELAY));
        assert!(transition.is_done());
        assert!(!transition.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_restart_is_ignored() {
        let t0 = Instant::now();
        let mut transition = Transition::default();
        transition.start(t0);
        transition.start(t0 + Duration::from_secs(1));
        assert_eq!(transition.deadline(), Some(t0 + TRANSITION_DELAY));
    }

    #[test]
    fn test_cancelled_never_fires() {
        let t0 = Instant::now();
        let mut transition = Transition::default();
        transition.start(t0);
        transition.cancel();

        assert!(!transition.is_running());
        assert!(!transition.poll(t0 + Duration::from_secs(10)));
        assert!(!transition.is_done());
    }

    #[test]
    fn test_progress() {
        let t0 = Instant::now();
        let mut transition = Transition::new(Duration::from_millis(1000));
        assert_eq!(transition.progress(t0), 0.0);

        transition.start(t0);
        let half = transition.progress(t0 + Duration::from_millis(500));
        assert!((half - 0.5).abs() < 1e-9);

        transition.poll(t0 + Duration::from_millis(1000));
        assert_eq!(transition.progress(t0), 1.0);
    }
}
