//! Kernel errors
//!
//! Any [`HarvestError`] returned by a task abandons it: the scheduler removes the
//! task, forwards the message as the abandon reason and moves on.

use crate::state_machine::HarvestPhase;
use keepsake_accessor::AccessError;
use keepsake_question::{ModuleId, QuestionError};

/// Errors that end a harvest task without a batch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarvestError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("component '{type_name}' not found on module {module}")]
    ComponentNotFound { module: ModuleId, type_name: String },

    #[error("The stage number went down from {from} to {to}.")]
    StageRegression { from: i64, to: i64 },

    #[error("{what} was never observed")]
    MissingObservation { what: String },

    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error("invalid harvest definition: {0}")]
    Definition(String),

    #[error("{0}")]
    Abandoned(String),
}

impl HarvestError {
    /// Whether the error points at a defect in the harvest definition rather than
    /// at unexpected component state
    #[must_use]
    pub fn is_construction_defect(&self) -> bool {
        matches!(
            self,
            Self::Question(_) | Self::Phase(_) | Self::Definition(_)
        )
    }
}

/// Illegal phase change inside a task
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal phase transition {from} -> {to}")]
pub struct PhaseError {
    pub from: HarvestPhase,
    pub to: HarvestPhase,
}

/// Errors raised when registering tasks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("module {0} already has a harvest task")]
    DuplicateModule(ModuleId),

    #[error("no harvest definition for module type '{0}'")]
    NoDefinition(String),
}
