//! Harvest task phases
//!
//! Every task moves forward only: an optional readiness gate, zero or more
//! observation stages with strictly increasing indices, the wait for the solve,
//! finalization and completion.

use crate::error::PhaseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a harvest task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarvestPhase {
    /// Created, nothing observed yet
    Initial,
    /// Waiting for the global readiness gate
    AwaitingActivation,
    /// Observing the given stage
    Observing {
        /// Stage index (0-based for staged tasks, as reported for continuous ones)
        stage: u32,
    },
    /// Waiting for the solve signal
    AwaitingSolve,
    /// Reading post-solve state and building questions
    Finalizing,
    /// Batch emitted
    Completed,
}

impl HarvestPhase {
    /// Whether no further transition is possible
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    fn rank(self) -> u8 {
        match self {
            Self::Initial => 0,
            Self::AwaitingActivation => 1,
            Self::Observing { .. } => 2,
            Self::AwaitingSolve => 3,
            Self::Finalizing => 4,
            Self::Completed => 5,
        }
    }
}

impl fmt::Display for HarvestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("initial"),
            Self::AwaitingActivation => f.write_str("awaiting-activation"),
            Self::Observing { stage } => write!(f, "observing(stage {stage})"),
            Self::AwaitingSolve => f.write_str("awaiting-solve"),
            Self::Finalizing => f.write_str("finalizing"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// Validate a phase transition
///
/// # Errors
/// Returns `PhaseError` when `to` is not reachable from `from` in one step
pub fn validate_transition(from: HarvestPhase, to: HarvestPhase) -> Result<(), PhaseError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(PhaseError { from, to })
    }
}

/// Whether `to` directly follows `from`
#[must_use]
pub fn allowed(from: HarvestPhase, to: HarvestPhase) -> bool {
    use HarvestPhase::{AwaitingActivation, AwaitingSolve, Completed, Finalizing, Initial, Observing};
    match (from, to) {
        (Observing { stage: a }, Observing { stage: b }) => b > a,
        (Initial, AwaitingActivation | Observing { .. } | AwaitingSolve | Finalizing)
        | (AwaitingActivation, Observing { .. } | AwaitingSolve | Finalizing)
        | (Observing { .. }, AwaitingSolve | Finalizing)
        | (AwaitingSolve, Finalizing)
        | (Finalizing, Completed) => true,
        _ => false,
    }
}

/// Phases reachable from `from` in one step, with `Observing` represented by the
/// next stage only
#[must_use]
pub fn allowed_transitions(from: HarvestPhase) -> Vec<HarvestPhase> {
    use HarvestPhase::{AwaitingActivation, AwaitingSolve, Completed, Finalizing, Initial, Observing};
    match from {
        Initial => vec![AwaitingActivation, Observing { stage: 0 }, AwaitingSolve, Finalizing],
        AwaitingActivation => vec![Observing { stage: 0 }, AwaitingSolve, Finalizing],
        Observing { stage } => vec![
            Observing {
                stage: stage.saturating_add(1),
            },
            AwaitingSolve,
            Finalizing,
        ],
        AwaitingSolve => vec![Finalizing],
        Finalizing => vec![Completed],
        Completed => vec![],
    }
}

/// Whether `to` is strictly later than `from` in lifecycle order
#[must_use]
pub fn is_forward(from: HarvestPhase, to: HarvestPhase) -> bool {
    match (from, to) {
        (HarvestPhase::Observing { stage: a }, HarvestPhase::Observing { stage: b }) => b > a,
        _ => to.rank() > from.rank(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observing_must_increase() {
        let one = HarvestPhase::Observing { stage: 1 };
        let two = HarvestPhase::Observing { stage: 2 };
        assert!(validate_transition(one, two).is_ok());
        assert!(validate_transition(two, one).is_err());
        assert!(validate_transition(one, one).is_err());
    }

    #[test]
    fn completed_is_terminal() {
        assert!(allowed_transitions(HarvestPhase::Completed).is_empty());
        assert!(HarvestPhase::Completed.is_terminal());
        assert!(validate_transition(HarvestPhase::AwaitingSolve, HarvestPhase::Completed).is_err());
    }
}
