//! Per-task harvest context

use crate::error::HarvestError;
use crate::host::{Host, ModuleRecord, ModuleSignals, StrikeWatch};
use crate::state_machine::{validate_transition, HarvestPhase};
use crate::wait::{self, Clock};
use keepsake_accessor::ComponentHandle;
use keepsake_question::{
    ModuleId, PendingBatch, Question, QuestionBatch, QuestionBuilder, QuestionCatalog, QuestionKind,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Everything a running task may touch
///
/// Owned by exactly one task. Questions added here stay pending until
/// [`finish`](Self::finish) seals them into a batch.
pub struct HarvestContext {
    module: ModuleId,
    module_type: String,
    host: Arc<dyn Host>,
    signals: ModuleSignals,
    clock: Clock,
    catalog: Arc<QuestionCatalog>,
    poll_interval: Duration,
    phase: watch::Sender<HarvestPhase>,
    pending: PendingBatch,
}

impl HarvestContext {
    /// Context for `record`, reporting phase changes through `phase`
    #[must_use]
    pub fn new(
        record: &ModuleRecord,
        host: Arc<dyn Host>,
        clock: Clock,
        catalog: Arc<QuestionCatalog>,
        poll_interval: Duration,
        phase: watch::Sender<HarvestPhase>,
    ) -> Self {
        Self {
            module: record.id,
            module_type: record.module_type.clone(),
            host,
            signals: record.signals.clone(),
            clock,
            catalog,
            poll_interval,
            phase,
            pending: PendingBatch::new(),
        }
    }

    /// Module this task harvests
    #[inline]
    #[must_use]
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// Module type identifier
    #[must_use]
    pub fn module_type(&self) -> &str {
        &self.module_type
    }

    /// Look up the module's component of `type_name`
    ///
    /// # Errors
    /// `ComponentNotFound` if the host has no such component on this module
    pub fn component(&self, type_name: &str) -> Result<ComponentHandle, HarvestError> {
        self.host
            .find_component(self.module, type_name)
            .ok_or_else(|| HarvestError::ComponentNotFound {
                module: self.module,
                type_name: type_name.to_string(),
            })
    }

    /// Fixed answer domain of `kind`
    #[must_use]
    pub fn answers(&self, kind: QuestionKind) -> Vec<String> {
        self.catalog.answers(kind).to_vec()
    }

    /// Catalog used to build questions
    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Build a question about this module without queuing it
    ///
    /// # Errors
    /// Any construction error from the builder
    pub fn question(&self, builder: QuestionBuilder) -> Result<Question, HarvestError> {
        Ok(builder.build(self.module, &self.catalog)?)
    }

    /// Build and queue one question
    ///
    /// # Errors
    /// Any construction error from the builder
    pub fn add_question(&mut self, builder: QuestionBuilder) -> Result<(), HarvestError> {
        let question = self.question(builder)?;
        self.pending.push(question);
        Ok(())
    }

    /// Build and queue questions in order; nothing is queued if any fails
    ///
    /// # Errors
    /// The first construction error
    pub fn add_questions(
        &mut self,
        builders: impl IntoIterator<Item = QuestionBuilder>,
    ) -> Result<(), HarvestError> {
        let questions = builders
            .into_iter()
            .map(|builder| self.question(builder))
            .collect::<Result<Vec<_>, _>>()?;
        self.pending.extend(questions);
        Ok(())
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> HarvestPhase {
        *self.phase.borrow()
    }

    /// Move to `next`
    ///
    /// # Errors
    /// `Phase` if the transition is not allowed
    pub fn enter(&mut self, next: HarvestPhase) -> Result<(), HarvestError> {
        let current = self.phase();
        validate_transition(current, next)?;
        debug!(module = %self.module, from = %current, to = %next, "phase change");
        self.phase.send_replace(next);
        Ok(())
    }

    /// Whether the readiness gate is open
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.host.is_activated()
    }

    /// Whether the module has been solved
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.signals.is_solved()
    }

    /// Subscribe to strikes from now on
    #[must_use]
    pub fn strike_watch(&self) -> StrikeWatch {
        self.signals.strike_watch()
    }

    /// Logical clock shared with the scheduler
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Suspend for `duration`
    pub async fn wait(&self, duration: Duration) {
        wait::wait(&self.clock, duration).await;
    }

    /// Re-evaluate `predicate` at the polling cadence until it holds
    ///
    /// # Errors
    /// Whatever the predicate returns
    pub async fn poll_until<F>(&self, predicate: F) -> Result<(), HarvestError>
    where
        F: FnMut() -> Result<bool, HarvestError>,
    {
        wait::poll_until(&self.clock, self.poll_interval, predicate).await
    }

    /// Suspend until the readiness gate opens
    pub async fn wait_for_activation(&self) {
        while !self.is_activated() {
            self.wait(self.poll_interval).await;
        }
    }

    /// Suspend until the module is solved
    pub async fn wait_for_solve(&self) {
        while !self.is_solved() {
            wait::next_tick().await;
        }
    }

    /// Seal the pending questions and complete the task
    ///
    /// # Errors
    /// `Phase` unless the task is finalizing
    pub fn finish(mut self) -> Result<QuestionBatch, HarvestError> {
        self.enter(HarvestPhase::Completed)?;
        Ok(self.pending.seal(self.module))
    }
}

impl std::fmt::Debug for HarvestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestContext")
            .field("module", &self.module)
            .field("module_type", &self.module_type)
            .field("phase", &self.phase())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}
