//! Keepsake Question Records
//!
//! Immutable multiple-choice questions built from harvested puzzle state.
//!
//! # Core Concepts
//!
//! - [`QuestionKind`]: every question the catalog can ask
//! - [`QuestionCatalog`]: templates and answer domains per kind
//! - [`QuestionBuilder`]: validates and builds a [`Question`]
//! - [`QuestionBatch`]: ordered questions from one task, sealed at its terminal state
//!
//! Wrong answers are chosen in this order: the explicit pool, then the preferred
//! wrong answers topped up from the kind's domain, then the domain alone.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod batch;
mod catalog;
mod distractor;
mod error;
mod kind;
mod ordinal;
mod question;

// Re-exports
pub use batch::{PendingBatch, QuestionBatch};
pub use catalog::{AnswerDomain, QuestionCatalog, QuestionInfo};
pub use distractor::AnswerSet;
pub use error::QuestionError;
pub use kind::{AnswerType, ModuleId, QuestionKind};
pub use ordinal::ordinal;
pub use question::{Question, QuestionBuilder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
