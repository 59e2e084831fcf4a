//! Question construction errors
//!
//! These indicate a defect in the harvest definition that built the question, not a
//! problem with the component. They abandon the task like any other error.

use crate::kind::QuestionKind;

/// Errors raised while building a question record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("{kind}: correct answers must not be empty")]
    EmptyCorrectAnswers { kind: QuestionKind },

    #[error("{kind}: correct answer '{answer}' is not in the answer pool")]
    CorrectNotInPool { kind: QuestionKind, answer: String },

    #[error("{kind}: template takes {expected} format arguments, got {actual}")]
    FormatArgCount {
        kind: QuestionKind,
        expected: usize,
        actual: usize,
    },

    #[error("unknown question kind '{0}'")]
    UnknownKind(String),
}
