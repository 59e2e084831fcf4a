//! Question records and their builder

use crate::catalog::QuestionCatalog;
use crate::distractor::distractor_pool;
use crate::error::QuestionError;
use crate::kind::{ModuleId, QuestionKind};
use indexmap::IndexSet;
use serde::Serialize;

/// Immutable question about one module
///
/// # Invariants
/// - `correct_answers` is non-empty and free of duplicates
/// - every correct answer is contained in `all_answers` when that pool is given
/// - `format_args` matches the kind's template arity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    kind: QuestionKind,
    module: ModuleId,
    format_args: Vec<String>,
    correct_answers: Vec<String>,
    preferred_wrong_answers: Option<Vec<String>>,
    all_answers: Option<Vec<String>>,
    #[serde(skip)]
    pub(crate) distractors: Vec<String>,
    #[serde(skip)]
    pub(crate) fallback: Vec<String>,
}

impl Question {
    /// Question kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Module the question is about
    #[inline]
    #[must_use]
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Template arguments, in order
    #[must_use]
    pub fn format_args(&self) -> &[String] {
        &self.format_args
    }

    /// Accepted answers
    #[must_use]
    pub fn correct_answers(&self) -> &[String] {
        &self.correct_answers
    }

    /// Wrong answers the harvest preferred, if any
    #[must_use]
    pub fn preferred_wrong_answers(&self) -> Option<&[String]> {
        self.preferred_wrong_answers.as_deref()
    }

    /// Explicit full answer pool, if any
    #[must_use]
    pub fn all_answers(&self) -> Option<&[String]> {
        self.all_answers.as_deref()
    }

    /// Wrong-answer candidates drawn from first
    ///
    /// `all_answers \ correct` when a pool was given, else `preferred \ correct` when
    /// preferred wrong answers were given, else the kind's domain minus correct.
    #[must_use]
    pub fn wrong_candidates(&self) -> &[String] {
        &self.distractors
    }

    /// Whether `answer` is accepted
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answers.iter().any(|a| a == answer)
    }
}

/// Builder for [`Question`]
///
/// # Example
/// ```rust
/// use keepsake_question::{ordinal, ModuleId, QuestionBuilder, QuestionCatalog, QuestionKind};
///
/// let catalog = QuestionCatalog::builtin();
/// let question = QuestionBuilder::new(QuestionKind::IceCreamCustomer)
///     .format_arg(ordinal(1))
///     .correct("Mike")
///     .build(ModuleId(3), &catalog)
///     .unwrap();
/// assert!(question.is_correct("Mike"));
/// assert!(!question.wrong_candidates().contains(&"Mike".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct QuestionBuilder {
    kind: QuestionKind,
    format_args: Vec<String>,
    correct: Vec<String>,
    preferred_wrong: Option<Vec<String>>,
    all: Option<Vec<String>>,
}

impl QuestionBuilder {
    /// Start a question of `kind`
    #[must_use]
    pub fn new(kind: QuestionKind) -> Self {
        Self {
            kind,
            format_args: Vec::new(),
            correct: Vec::new(),
            preferred_wrong: None,
            all: None,
        }
    }

    /// Append one template argument
    #[inline]
    #[must_use]
    pub fn format_arg(mut self, arg: impl Into<String>) -> Self {
        self.format_args.push(arg.into());
        self
    }

    /// Append template arguments
    #[must_use]
    pub fn format_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.format_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add one accepted answer
    #[inline]
    #[must_use]
    pub fn correct(mut self, answer: impl Into<String>) -> Self {
        self.correct.push(answer.into());
        self
    }

    /// Add accepted answers
    #[must_use]
    pub fn correct_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.correct.extend(answers.into_iter().map(Into::into));
        self
    }

    /// Prefer these wrong answers over the kind's domain
    #[must_use]
    pub fn preferred_wrong<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_wrong = Some(answers.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict answers to this explicit pool
    #[must_use]
    pub fn all_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all = Some(answers.into_iter().map(Into::into).collect());
        self
    }

    /// Validate and build the record for `module`
    ///
    /// # Errors
    /// - `UnknownKind` if `catalog` has no entry for the kind
    /// - `FormatArgCount` if the argument count differs from the template arity
    /// - `EmptyCorrectAnswers` if no correct answer was given
    /// - `CorrectNotInPool` if a correct answer is missing from the explicit pool
    pub fn build(
        self,
        module: ModuleId,
        catalog: &QuestionCatalog,
    ) -> Result<Question, QuestionError> {
        let kind = self.kind;
        let info = catalog
            .info(kind)
            .ok_or_else(|| QuestionError::UnknownKind(kind.name().to_string()))?;

        let expected = info.format_arg_count();
        if self.format_args.len() != expected {
            return Err(QuestionError::FormatArgCount {
                kind,
                expected,
                actual: self.format_args.len(),
            });
        }

        let correct: IndexSet<String> = self.correct.into_iter().collect();
        if correct.is_empty() {
            return Err(QuestionError::EmptyCorrectAnswers { kind });
        }

        if let Some(pool) = &self.all {
            if let Some(missing) = correct.iter().find(|answer| !pool.contains(answer)) {
                return Err(QuestionError::CorrectNotInPool {
                    kind,
                    answer: missing.clone(),
                });
            }
        }

        let (distractors, fallback) = distractor_pool(
            &correct,
            self.preferred_wrong.as_deref(),
            self.all.as_deref(),
            info.domain.answers(),
        );

        Ok(Question {
            kind,
            module,
            format_args: self.format_args,
            correct_answers: correct.into_iter().collect(),
            preferred_wrong_answers: self.preferred_wrong,
            all_answers: self.all,
            distractors,
            fallback,
        })
    }
}
