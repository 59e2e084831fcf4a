//! Presentation-side collector of harvest results

use keepsake_question::{ModuleId, QuestionBatch};

/// Receives completed batches and abandonment reasons
pub trait QuestionSink {
    /// A task completed; `batch` may be empty
    fn accept_batch(&mut self, batch: QuestionBatch);

    /// A task abandoned with `reason`
    fn abandoned(&mut self, module: ModuleId, module_type: &str, reason: &str);
}

/// Abandonment record kept by [`CollectingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abandonment {
    /// Module whose task abandoned
    pub module: ModuleId,
    /// Its module type
    pub module_type: String,
    /// Human-readable reason
    pub reason: String,
}

/// Sink that keeps everything in memory, in arrival order
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Completed batches
    pub batches: Vec<QuestionBatch>,
    /// Abandoned tasks
    pub abandoned: Vec<Abandonment>,
}

impl CollectingSink {
    /// Empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch received for `module`, if any
    #[must_use]
    pub fn batch_for(&self, module: ModuleId) -> Option<&QuestionBatch> {
        self.batches.iter().find(|batch| batch.module() == module)
    }

    /// Abandonment recorded for `module`, if any
    #[must_use]
    pub fn abandonment_for(&self, module: ModuleId) -> Option<&Abandonment> {
        self.abandoned.iter().find(|a| a.module == module)
    }
}

impl QuestionSink for CollectingSink {
    fn accept_batch(&mut self, batch: QuestionBatch) {
        self.batches.push(batch);
    }

    fn abandoned(&mut self, module: ModuleId, module_type: &str, reason: &str) {
        self.abandoned.push(Abandonment {
            module,
            module_type: module_type.to_string(),
            reason: reason.to_string(),
        });
    }
}
