//! Passcode keypad state
//!
//! Digits go into a buffer capped at four characters. Filling the buffer
//! schedules a validation a short moment later so the last dot is visible
//! before the result. A mismatch shows an error that clears itself after a
//! few seconds. There is no attempt counter and no lockout.

use std::time::{Duration, Instant};

use zeroize::Zeroizing;

use crate::credential::{Credential, CredentialVerifier, CREDENTIAL_LENGTH};
use crate::error::{LaunchpadError, Result};
use crate::timer::Timers;

/// Delay between the fourth digit and the comparison
pub const VALIDATION_DELAY: Duration = Duration::from_millis(300);

/// How long a mismatch message stays up
pub const ERROR_DISPLAY: Duration = Duration::from_millis(3000);

/// Outcome reported by [`Gate::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSignal {
    /// Passcode accepted
    Success,
    /// Passcode rejected; the error is now visible
    Failure,
    /// The error display timed out
    ErrorCleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateTask {
    Validate,
    ClearError,
}

/// Keypad input buffer with deferred validation
pub struct Gate {
    buffer: Zeroizing<String>,
    error_visible: bool,
    timers: Timers<GateTask>,
    validation_delay: Duration,
    error_display: Duration,
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate {
    pub fn new() -> Self {
        Self::with_delays(VALIDATION_DELAY, ERROR_DISPLAY)
    }

    pub fn with_delays(validation_delay: Duration, error_display: Duration) -> Self {
        Self {
            buffer: Zeroizing::new(String::with_capacity(CREDENTIAL_LENGTH)),
            error_visible: false,
            timers: Timers::new(),
            validation_delay,
            error_display,
        }
    }

    /// Append a digit
    ///
    /// A full buffer ignores further digits. Completing the buffer schedules
    /// validation.
    pub fn enter_digit(&mut self, digit: char, now: Instant) -> Result<()> {
        if !digit.is_ascii_digit() {
            return Err(LaunchpadError::InvalidDigit(digit));
        }
        if self.is_full() {
            return Ok(());
        }

        self.buffer.push(digit);
        if self.is_full() {
            self.timers
                .schedule(GateTask::Validate, now, self.validation_delay);
        }
        Ok(())
    }

    /// Remove the last digit and hide any error
    ///
    /// Returns `false` (and changes nothing) when the buffer is empty.
    /// Deleting from a full buffer cancels the pending validation.
    pub fn delete(&mut self) -> bool {
        if self.buffer.pop().is_none() {
            return false;
        }

        self.timers.cancel_kind(GateTask::Validate);
        if self.error_visible {
            self.error_visible = false;
            self.timers.cancel_kind(GateTask::ClearError);
        }
        true
    }

    /// Run the next due task, if any
    ///
    /// Call repeatedly until it returns `None` to drain everything due at
    /// `now`.
    pub fn poll<V>(&mut self, now: Instant, verifier: &V) -> Option<GateSignal>
    where
        V: CredentialVerifier + ?Sized,
    {
        let (_, task) = self.timers.pop_due(now)?;

        let signal = match task {
            GateTask::Validate => {
                let accepted = Credential::parse(&self.buffer)
                    .map(|candidate| verifier.verify(&candidate))
                    .unwrap_or(false);
                self.buffer.clear();

                if accepted {
                    self.hide_error();
                    GateSignal::Success
                } else {
                    self.error_visible = true;
                    self.timers.cancel_kind(GateTask::ClearError);
                    self.timers
                        .schedule(GateTask::ClearError, now, self.error_display);
                    GateSignal::Failure
                }
            }
            GateTask::ClearError => {
                self.error_visible = false;
                GateSignal::ErrorCleared
            }
        };

        tracing::debug!(?signal, "gate");
        Some(signal)
    }

    /// Drop input, error and every pending task
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.error_visible = false;
        self.timers.cancel_all();
    }

    /// Number of digits entered
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() >= CREDENTIAL_LENGTH
    }

    /// Whether the mismatch message is showing
    pub fn error_visible(&self) -> bool {
        self.error_visible
    }

    /// Whether a full buffer is waiting to be compared
    pub fn is_validating(&self) -> bool {
        self.timers.has_pending(GateTask::Validate)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn hide_error(&mut self) {
        self.error_visible = false;
        self.timers.cancel_kind(GateTask::ClearError);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::PlainVerifier;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn type_code(gate: &mut Gate, code: &str, now: Instant) {
        for digit in code.chars() {
            gate.enter_digit(digit, now).unwrap();
        }
    }

    #[test]
    fn test_correct_code_succeeds_after_delay() {
        let t0 = Instant::now();
        let verifier = PlainVerifier::default();
        let mut gate = Gate::new();

        type_code(&mut gate, "1997", t0);
        assert!(gate.is_full());
        assert!(gate.is_validating());

        assert_eq!(gate.poll(t0 + ms(299), &verifier), None);
        assert_eq!(gate.poll(t0 + ms(300), &verifier), Some(GateSignal::Success));
        assert!(gate.is_empty());
        assert!(!gate.error_visible());
        assert_eq!(gate.poll(t0 + ms(10_000), &verifier), None);
    }

    #[test]
    fn test_wrong_code_shows_error_until_timeout() {
        let t0 = Instant::now();
        let verifier = PlainVerifier::default();
        let mut gate = Gate::new();

        type_code(&mut gate, "0000", t0);
        let failed_at = t0 + ms(300);
        assert_eq!(gate.poll(failed_at, &verifier), Some(GateSignal::Failure));
        assert!(gate.is_empty());
        assert!(gate.error_visible());

        assert_eq!(gate.poll(failed_at + ms(2999), &verifier), None);
        assert!(gate.error_visible());

        assert_eq!(
            gate.poll(failed_at + ms(3000), &verifier),
            Some(GateSignal::ErrorCleared)
        );
        assert!(!gate.error_visible());
    }

    #[test]
    fn test_fifth_digit_is_ignored() {
        let t0 = Instant::now();
        let mut gate = Gate::new();
        type_code(&mut gate, "12345", t0);
        assert_eq!(gate.len(), 4);
    }

    #[test]
    fn test_non_digit_is_rejected() {
        let mut gate = Gate::new();
        assert!(matches!(
            gate.enter_digit('x', Instant::now()),
            Err(LaunchpadError::InvalidDigit('x'))
        ));
        assert!(gate.is_empty());
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        let t0 = Instant::now();
        let verifier = PlainVerifier::default();
        let mut gate = Gate::new();
        assert!(!gate.delete());

        type_code(&mut gate, "0000", t0);
        gate.poll(t0 + ms(300), &verifier);
        assert!(gate.error_visible());

        // Buffer is empty after a failure, so delete leaves the error up
        assert!(!gate.delete());
        assert!(gate.error_visible());
    }

    #[test]
    fn test_delete_clears_error_immediately() {
        let t0 = Instant::now();
        let verifier = PlainVerifier::default();
        let mut gate = Gate::new();

        type_code(&mut gate, "0000", t0);
        gate.poll(t0 + ms(300), &verifier);
        gate.enter_digit('1', t0 + ms(400)).unwrap();

        assert!(gate.delete());
        assert!(!gate.error_visible());
        assert!(gate.is_empty());
        assert_eq!(gate.next_deadline(), None);
    }

    #[test]
    fn test_delete_cancels_pending_validation() {
        let t0 = Instant::now();
        let verifier = PlainVerifier::default();
        let mut gate = Gate::new();

        type_code(&mut gate, "1997", t0);
        assert!(gate.delete());
        assert!(!gate.is_validating());
        assert_eq!(gate.poll(t0 + ms(1000), &verifier), None);
        assert_eq!(gate.len(), 3);
    }

    #[test]
    fn test_second_failure_rearms_error_timer() {
        let t0 = Instant::now();
        let verifier = PlainVerifier::default();
        let mut gate = Gate::new();

        type_code(&mut gate, "0000", t0);
        assert_eq!(gate.poll(t0 + ms(300), &verifier), Some(GateSignal::Failure));

        type_code(&mut gate, "1111", t0 + ms(1000));
        assert_eq!(
            gate.poll(t0 + ms(1300), &verifier),
            Some(GateSignal::Failure)
        );

        // The first failure's timer would have fired at 3300
        assert_eq!(gate.poll(t0 + ms(3300), &verifier), None);
        assert!(gate.error_visible());
        assert_eq!(
            gate.poll(t0 + ms(4300), &verifier),
            Some(GateSignal::ErrorCleared)
        );
    }

    #[test]
    fn test_success_hides_previous_error() {
        let t0 = Instant::now();
        let verifier = PlainVerifier::default();
        let mut gate = Gate::new();

        type_code(&mut gate, "0000", t0);
        gate.poll(t0 + ms(300), &verifier);
        type_code(&mut gate, "1997", t0 + ms(500));

        assert_eq!(gate.poll(t0 + ms(800), &verifier), Some(GateSignal::Success));
        assert!(!gate.error_visible());
        assert_eq!(gate.next_deadline(), None);
    }

    #[test]
    fn test_reset_cancels_everything() {
        let t0 = Instant::now();
        let mut gate = Gate::new();
        type_code(&mut gate, "1997", t0);

        gate.reset();
        assert!(gate.is_empty());
        assert_eq!(gate.poll(t0 + ms(1000), &PlainVerifier::default()), None);
    }
}
