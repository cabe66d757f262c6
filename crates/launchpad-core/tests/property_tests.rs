//! Property-based tests for launchpad-core using proptest
//!
//! These tests verify invariants that should hold for all keypad inputs.

use std::time::{Duration, Instant};

use launchpad_core::{
    credential::DEFAULT_SECRET,
    gate::{ERROR_DISPLAY, VALIDATION_DELAY},
    store::keys,
    Carousel, FlowController, FlowEvent, Gate, GateSignal, KeyValueStore, KvSessionStore,
    MemoryStore, PlainVerifier, ScreenState, SharedStore,
};
use proptest::prelude::*;

// ============================================
// Strategies
// ============================================

fn arb_code() -> impl Strategy<Value = String> {
    "[0-9]{4}"
}

fn arb_wrong_code() -> impl Strategy<Value = String> {
    arb_code().prop_filter("must differ from the secret", |code| code != DEFAULT_SECRET)
}

/// Keypad actions: `Some(d)` is a digit press, `None` is delete
fn arb_keypresses() -> impl Strategy<Value = Vec<Option<char>>> {
    prop::collection::vec(
        prop_oneof![
            3 => (0u32..10).prop_map(|d| char::from_digit(d, 10)),
            1 => Just(None),
        ],
        0..24,
    )
}

fn drain(gate: &mut Gate, now: Instant, verifier: &PlainVerifier) -> Vec<GateSignal> {
    std::iter::from_fn(|| gate.poll(now, verifier)).collect()
}

// ============================================
// Property Tests
// ============================================

proptest! {
    // ----------------------------------------
    // Gate Properties
    // ----------------------------------------

    #[test]
    fn wrong_code_fails_once_then_clears(code in arb_wrong_code()) {
        let t0 = Instant::now();
        let verifier = PlainVerifier::default();
        let mut gate = Gate::new();

        for digit in code.chars() {
            gate.enter_digit(digit, t0).unwrap();
        }

        let validated_at = t0 + VALIDATION_DELAY;
        prop_assert_eq!(drain(&mut gate, validated_at, &verifier), vec![GateSignal::Failure]);
        prop_assert!(gate.is_empty());
        prop_assert!(gate.error_visible());

        let just_before = validated_at + ERROR_DISPLAY - Duration::from_millis(1);
        prop_assert!(drain(&mut gate, just_before, &verifier).is_empty());
        prop_assert!(gate.error_visible());

        prop_assert_eq!(
            drain(&mut gate, validated_at + ERROR_DISPLAY, &verifier),
            vec![GateSignal::ErrorCleared]
        );
        prop_assert!(!gate.error_visible());
    }

    #[test]
    fn buffer_length_stays_bounded(presses in arb_keypresses()) {
        let t0 = Instant::now();
        let mut gate = Gate::new();

        for press in presses {
            match press {
                Some(digit) => gate.enter_digit(digit, t0).unwrap(),
                None => {
                    let before = gate.len();
                    let removed = gate.delete();
                    prop_assert_eq!(removed, before > 0);
                }
            }
            prop_assert!(gate.len() <= 4);
        }
    }

    #[test]
    fn non_digits_are_rejected(c in any::<char>().prop_filter("non-digit", |c| !c.is_ascii_digit())) {
        let mut gate = Gate::new();
        gate.enter_digit('1', Instant::now()).unwrap();

        prop_assert!(gate.enter_digit(c, Instant::now()).is_err());
        prop_assert_eq!(gate.len(), 1);
    }

    // ----------------------------------------
    // Flow Properties
    // ----------------------------------------

    #[test]
    fn flow_only_unlocks_on_secret(code in arb_code()) {
        let t0 = Instant::now();
        let store = SharedStore::new(MemoryStore::new());
        let mut flow =
            FlowController::new(KvSessionStore::new(store.clone()), PlainVerifier::default());

        for digit in code.chars() {
            flow.enter_digit(digit, t0).unwrap();
        }
        let events = flow.tick(t0 + VALIDATION_DELAY).unwrap();

        if code == DEFAULT_SECRET {
            prop_assert_eq!(events, vec![FlowEvent::Authenticated]);
            prop_assert_eq!(flow.state(), ScreenState::Transitioning);
            let flag = store.get(keys::SESSION);
            prop_assert_eq!(flag.as_deref(), Some("true"));
        } else {
            prop_assert_eq!(events, vec![FlowEvent::CredentialRejected]);
            prop_assert_eq!(flow.state(), ScreenState::Gate);
            prop_assert!(store.get(keys::SESSION).is_none());
        }
    }

    #[test]
    fn any_stored_flag_other_than_true_starts_locked(value in "[a-zA-Z0-9]{0,8}") {
        prop_assume!(value != "true");
        let mut store = MemoryStore::new();
        store.set(keys::SESSION, &value).unwrap();

        let flow = FlowController::new(KvSessionStore::new(store), PlainVerifier::default());
        prop_assert_eq!(flow.state(), ScreenState::Gate);
    }

    // ----------------------------------------
    // Carousel Properties
    // ----------------------------------------

    #[test]
    fn carousel_page_in_range(
        pages in 1usize..6,
        gestures in prop::collection::vec((-2000.0f64..2000.0, -400.0f64..400.0), 0..16),
    ) {
        let mut carousel = Carousel::new(pages);
        for (velocity, offset) in gestures {
            let page = carousel.settle(velocity, offset, 340.0);
            prop_assert!(page < pages);
        }
    }
}

#[test]
fn test_secret_succeeds_exactly_once() {
    let t0 = Instant::now();
    let verifier = PlainVerifier::default();
    let mut gate = Gate::new();

    for digit in DEFAULT_SECRET.chars() {
        gate.enter_digit(digit, t0).unwrap();
    }

    assert!(drain(&mut gate, t0 + VALIDATION_DELAY - Duration::from_millis(1), &verifier).is_empty());
    assert_eq!(
        drain(&mut gate, t0 + VALIDATION_DELAY, &verifier),
        vec![GateSignal::Success]
    );
    assert!(drain(&mut gate, t0 + Duration::from_secs(60), &verifier).is_empty());
    assert!(gate.is_empty());
    assert!(!gate.error_visible());
}
