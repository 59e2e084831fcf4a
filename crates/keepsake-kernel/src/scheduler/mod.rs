//! Scheduler
//!
//! Owns every live task and advances each one poll per pass, in registration
//! order. The scheduler never ends a task itself: tasks finish by resolving, and a
//! resolved task is removed and its result forwarded to the [`QuestionSink`].

mod sink;

pub use sink::{Abandonment, CollectingSink, QuestionSink};

use crate::context::HarvestContext;
use crate::error::SchedulerError;
use crate::host::{Host, ModuleRecord};
use crate::state_machine::HarvestPhase;
use crate::task::{TaskFuture, TaskTable};
use crate::wait::Clock;
use futures::task::noop_waker_ref;
use indexmap::{IndexMap, IndexSet};
use keepsake_question::{ModuleId, QuestionCatalog};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Cadence of polling predicate waits
    pub poll_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl SchedulerConfig {
    /// Set the polling cadence
    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// How a task ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TaskStatus {
    /// Batch forwarded
    Completed {
        /// Questions in the batch
        questions: usize,
    },
    /// Abandoned without a batch
    Abandoned {
        /// Human-readable reason
        reason: String,
    },
}

/// Result of one task, reported by [`Scheduler::tick`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    /// Module the task harvested
    pub module: ModuleId,
    /// Its module type
    pub module_type: String,
    /// Last phase the task reported
    pub last_phase: HarvestPhase,
    /// Completion or abandonment
    pub status: TaskStatus,
}

impl TaskOutcome {
    /// Whether the task completed
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Completed { .. })
    }
}

struct LiveTask {
    module_type: String,
    future: TaskFuture,
    phase: watch::Receiver<HarvestPhase>,
}

/// Registry and driver of live harvest tasks
pub struct Scheduler<S> {
    config: SchedulerConfig,
    host: Arc<dyn Host>,
    catalog: Arc<QuestionCatalog>,
    tasks: TaskTable,
    clock: Clock,
    live: IndexMap<ModuleId, LiveTask>,
    /// Every module started so far, ended or not. Grows for the scheduler's
    /// lifetime unless cleared with [`Scheduler::forget_ended`].
    seen: IndexSet<ModuleId>,
    sink: S,
    ticks: u64,
}

impl<S: QuestionSink> Scheduler<S> {
    /// Create a scheduler with default configuration
    pub fn new(host: Arc<dyn Host>, catalog: Arc<QuestionCatalog>, tasks: TaskTable, sink: S) -> Self {
        Self {
            config: SchedulerConfig::default(),
            host,
            catalog,
            tasks,
            clock: Clock::new(),
            live: IndexMap::new(),
            seen: IndexSet::new(),
            sink,
            ticks: 0,
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the task for a discovered module
    ///
    /// # Errors
    /// - `DuplicateModule` if a task for this module was already started
    /// - `NoDefinition` if no task is registered for its module type
    pub fn start(&mut self, record: &ModuleRecord) -> Result<(), SchedulerError> {
        if self.seen.contains(&record.id) {
            return Err(SchedulerError::DuplicateModule(record.id));
        }
        let task = self
            .tasks
            .get(&record.module_type)
            .ok_or_else(|| SchedulerError::NoDefinition(record.module_type.clone()))?;

        let (phase_tx, phase_rx) = watch::channel(HarvestPhase::Initial);
        let ctx = HarvestContext::new(
            record,
            Arc::clone(&self.host),
            self.clock.clone(),
            Arc::clone(&self.catalog),
            self.config.poll_interval,
            phase_tx,
        );

        self.seen.insert(record.id);
        self.live.insert(
            record.id,
            LiveTask {
                module_type: record.module_type.clone(),
                future: task.start(ctx),
                phase: phase_rx,
            },
        );
        info!(module = %record.id, module_type = %record.module_type, name = %record.display_name, "harvest started");
        Ok(())
    }

    /// Forget modules whose task has ended, so they may be started again
    ///
    /// Call between bombs when module ids are reused. Live tasks stay registered.
    pub fn forget_ended(&mut self) {
        let live = &self.live;
        self.seen.retain(|module| live.contains_key(module));
    }

    /// Advance time by `delta` and poll every live task once
    pub fn tick(&mut self, delta: Duration) -> Vec<TaskOutcome> {
        self.clock.advance(delta);
        self.ticks += 1;

        let mut cx = Context::from_waker(noop_waker_ref());
        let mut finished = Vec::new();
        for (module, task) in &mut self.live {
            if let Poll::Ready(result) = task.future.as_mut().poll(&mut cx) {
                finished.push((*module, result));
            }
        }

        let mut outcomes = Vec::with_capacity(finished.len());
        for (module, result) in finished {
            let Some(task) = self.live.shift_remove(&module) else {
                continue;
            };
            let last_phase = *task.phase.borrow();

            let status = match result {
                Ok(batch) => {
                    let questions = batch.len();
                    info!(module = %module, module_type = %task.module_type, questions, "harvest completed");
                    self.sink.accept_batch(batch);
                    TaskStatus::Completed { questions }
                }
                Err(err) => {
                    let reason = err.to_string();
                    warn!(module = %module, module_type = %task.module_type, phase = %last_phase, defect = err.is_construction_defect(), %reason, "harvest abandoned");
                    self.sink.abandoned(module, &task.module_type, &reason);
                    TaskStatus::Abandoned { reason }
                }
            };

            outcomes.push(TaskOutcome {
                module,
                module_type: task.module_type,
                last_phase,
                status,
            });
        }
        outcomes
    }

    /// Tick until no task is live or `max_ticks` passes ran
    pub fn run_until_idle(&mut self, delta: Duration, max_ticks: u64) -> Vec<TaskOutcome> {
        let mut outcomes = Vec::new();
        let mut ran = 0;
        while !self.is_idle() && ran < max_ticks {
            outcomes.extend(self.tick(delta));
            ran += 1;
        }
        outcomes
    }

    /// Live tasks and their current phase, in registration order
    pub fn live_tasks(&self) -> impl Iterator<Item = (ModuleId, HarvestPhase)> + '_ {
        self.live
            .iter()
            .map(|(module, task)| (*module, *task.phase.borrow()))
    }

    /// Whether no task is live
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.live.is_empty()
    }

    /// Passes run so far
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Logical clock shared with the tasks
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Result collector
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Take the result collector
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S> std::fmt::Debug for Scheduler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("tasks", &self.tasks)
            .field("live", &self.live.keys().collect::<Vec<_>>())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
