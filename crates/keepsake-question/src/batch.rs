//! Question batches
//!
//! A task accumulates questions in a [`PendingBatch`] and seals it into a
//! [`QuestionBatch`] only at its terminal state. Order is preserved end to end.

use crate::kind::ModuleId;
use crate::question::Question;
use serde::Serialize;

/// Questions accumulated by a running task
#[derive(Debug, Default)]
pub struct PendingBatch {
    questions: Vec<Question>,
}

impl PendingBatch {
    /// Empty pending batch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one question
    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Append questions in order
    pub fn extend(&mut self, questions: impl IntoIterator<Item = Question>) {
        self.questions.extend(questions);
    }

    /// Number of pending questions
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Seal into an immutable batch for `module`
    #[must_use]
    pub fn seal(self, module: ModuleId) -> QuestionBatch {
        QuestionBatch {
            module,
            questions: self.questions,
        }
    }
}

/// Ordered, immutable questions produced by one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBatch {
    module: ModuleId,
    questions: Vec<Question>,
}

impl QuestionBatch {
    /// Empty batch for `module`
    #[must_use]
    pub fn empty(module: ModuleId) -> Self {
        PendingBatch::new().seal(module)
    }

    /// Module the batch belongs to
    #[inline]
    #[must_use]
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Questions in emission order
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the batch holds no questions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Iterate in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Take the questions out
    #[must_use]
    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionBatch {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QuestionBuilder, QuestionCatalog, QuestionKind};

    #[test]
    fn seal_preserves_order() {
        let catalog = QuestionCatalog::builtin();
        let mut pending = PendingBatch::new();
        for word in ["alpha", "beta", "gamma"] {
            pending.push(
                QuestionBuilder::new(QuestionKind::InfiniteLoopSelectedWord)
                    .correct(word)
                    .build(ModuleId(2), &catalog)
                    .unwrap(),
            );
        }
        let batch = pending.seal(ModuleId(2));
        let words: Vec<_> = batch
            .iter()
            .map(|q| q.correct_answers()[0].as_str())
            .collect();
        assert_eq!(words, ["alpha", "beta", "gamma"]);
        assert_eq!(batch.module(), ModuleId(2));
    }
}
