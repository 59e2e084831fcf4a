use keepsake_kernel::state_machine::{allowed_transitions, is_forward, validate_transition};
use keepsake_kernel::HarvestPhase;
use proptest::prelude::*;

#[test]
fn test_staged_lifecycle() {
    let path = [
        HarvestPhase::Initial,
        HarvestPhase::AwaitingActivation,
        HarvestPhase::Observing { stage: 0 },
        HarvestPhase::Observing { stage: 1 },
        HarvestPhase::Observing { stage: 2 },
        HarvestPhase::AwaitingSolve,
        HarvestPhase::Finalizing,
        HarvestPhase::Completed,
    ];
    for pair in path.windows(2) {
        assert!(validate_transition(pair[0], pair[1]).is_ok(), "{} -> {}", pair[0], pair[1]);
    }
}

#[test]
fn test_no_skipping_finalize() {
    assert!(validate_transition(HarvestPhase::AwaitingSolve, HarvestPhase::Completed).is_err());
    assert!(validate_transition(HarvestPhase::Initial, HarvestPhase::Completed).is_err());
}

fn phase() -> impl Strategy<Value = HarvestPhase> {
    prop_oneof![
        Just(HarvestPhase::Initial),
        Just(HarvestPhase::AwaitingActivation),
        (0_u32..5).prop_map(|stage| HarvestPhase::Observing { stage }),
        Just(HarvestPhase::AwaitingSolve),
        Just(HarvestPhase::Finalizing),
        Just(HarvestPhase::Completed),
    ]
}

proptest! {
    #[test]
    fn prop_allowed_transitions_move_forward(from in phase(), to in phase()) {
        if validate_transition(from, to).is_ok() {
            prop_assert!(is_forward(from, to));
        }
    }

    #[test]
    fn prop_listed_transitions_are_valid(from in phase()) {
        for to in allowed_transitions(from) {
            prop_assert!(validate_transition(from, to).is_ok());
        }
    }
}
