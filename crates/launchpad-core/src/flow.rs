//! Top-level screen state machine
//!
//! ```text
//!            success               timeout
//!   Gate ─────────────▶ Transitioning ─────────▶ Active
//!    ▲ │ failure                                    │
//!    └─┘                 logout                     │
//!    ▲──────────────────────────────────────────────┘
//! ```
//!
//! The controller owns the gate, the loading timer and the injected session
//! store. Leaving a state cancels every task that state scheduled.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::credential::CredentialVerifier;
use crate::error::{LaunchpadError, Result};
use crate::gate::{Gate, GateSignal, ERROR_DISPLAY, VALIDATION_DELAY};
use crate::session::SessionStore;
use crate::transition::{Transition, TRANSITION_DELAY};

/// Which screen the launcher is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenState {
    /// Passcode keypad
    #[default]
    Gate,
    /// Loading screen after a successful unlock
    Transitioning,
    /// Dashboard
    Active,
}

/// Something the UI may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// Passcode rejected, error now showing
    CredentialRejected,
    /// Error message timed out
    ErrorCleared,
    /// Passcode accepted, loading started
    Authenticated,
    /// Loading finished, dashboard showing
    Activated,
    /// Session flag disappeared while loading; back at the keypad
    SessionRevoked,
    /// Logged out, back at the keypad
    LoggedOut,
}

/// Delays used by the flow, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowTimings {
    /// Fourth digit to comparison
    pub validation_delay_ms: u64,
    /// Mismatch message lifetime
    pub error_display_ms: u64,
    /// Loading screen length
    pub transition_ms: u64,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            validation_delay_ms: VALIDATION_DELAY.as_millis() as u64,
            error_display_ms: ERROR_DISPLAY.as_millis() as u64,
            transition_ms: TRANSITION_DELAY.as_millis() as u64,
        }
    }
}

impl FlowTimings {
    pub fn validation_delay(&self) -> Duration {
        Duration::from_millis(self.validation_delay_ms)
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Gate, loading delay and session flag wired together
pub struct FlowController<S, V> {
    state: ScreenState,
    session: S,
    verifier: V,
    gate: Gate,
    transition: Transition,
    timings: FlowTimings,
}

impl<S: SessionStore, V: CredentialVerifier> FlowController<S, V> {
    /// Create a controller with the default delays
    pub fn new(session: S, verifier: V) -> Self {
        Self::with_timings(session, verifier, FlowTimings::default())
    }

    /// Create a controller, starting on the dashboard if the session flag is set
    pub fn with_timings(session: S, verifier: V, timings: FlowTimings) -> Self {
        let state = if session.load() {
            ScreenState::Active
        } else {
            ScreenState::Gate
        };
        debug!(?state, "Flow controller initialised");

        Self {
            state,
            session,
            verifier,
            gate: Gate::with_delays(timings.validation_delay(), timings.error_display()),
            transition: Transition::new(timings.transition()),
            timings,
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    /// Whether tiles may be launched
    pub fn is_authenticated(&self) -> bool {
        self.state == ScreenState::Active
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn timings(&self) -> FlowTimings {
        self.timings
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Keypad digit
    pub fn enter_digit(&mut self, digit: char, now: Instant) -> Result<()> {
        self.expect(ScreenState::Gate, "digit entry")?;
        self.gate.enter_digit(digit, now)
    }

    /// Keypad delete; `Ok(false)` when there was nothing to delete
    pub fn delete_digit(&mut self) -> Result<bool> {
        self.expect(ScreenState::Gate, "delete")?;
        Ok(self.gate.delete())
    }

    /// Clear the session flag and return to the keypad
    pub fn logout(&mut self) -> Result<FlowEvent> {
        self.expect(ScreenState::Active, "logout")?;
        self.session.clear()?;
        self.enter_gate();
        info!("Logged out");
        Ok(FlowEvent::LoggedOut)
    }

    /// Fire everything due at `now`
    pub fn tick(&mut self, now: Instant) -> Result<Vec<FlowEvent>> {
        let mut events = Vec::new();

        loop {
            match self.state {
                ScreenState::Gate => match self.gate.poll(now, &self.verifier) {
                    Some(GateSignal::Success) => {
                        self.session.save(true)?;
                        self.enter_transitioning(now);
                        info!("Passcode accepted");
                        events.push(FlowEvent::Authenticated);
                    }
                    Some(GateSignal::Failure) => {
                        debug!("Passcode rejected");
                        events.push(FlowEvent::CredentialRejected);
                    }
                    Some(GateSignal::ErrorCleared) => events.push(FlowEvent::ErrorCleared),
                    None => break,
                },
                ScreenState::Transitioning => {
                    if !self.transition.poll(now) {
                        break;
                    }
                    if self.session.load() {
                        self.state = ScreenState::Active;
                        debug!("Loading finished");
                        events.push(FlowEvent::Activated);
                    } else {
                        warn!("Session flag cleared during loading; locking");
                        self.enter_gate();
                        events.push(FlowEvent::SessionRevoked);
                    }
                }
                ScreenState::Active => break,
            }
        }

        Ok(events)
    }

    /// Earliest instant at which [`tick`](Self::tick) has work
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            ScreenState::Gate => self.gate.next_deadline(),
            ScreenState::Transitioning => self.transition.deadline(),
            ScreenState::Active => None,
        }
    }

    fn enter_transitioning(&mut self, now: Instant) {
        self.gate.reset();
        self.transition = Transition::new(self.timings.transition());
        self.transition.start(now);
        self.state = ScreenState::Transitioning;
    }

    fn enter_gate(&mut self) {
        self.transition.cancel();
        self.gate.reset();
        self.state = ScreenState::Gate;
    }

    fn expect(&self, expected: ScreenState, trigger: &'static str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(LaunchpadError::InvalidTransition {
                from: self.state,
                trigger,
            })
        }
    }
}
