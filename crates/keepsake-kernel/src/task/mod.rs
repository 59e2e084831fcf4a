//! Harvest tasks and the task table
//!
//! A task is a future that owns its [`HarvestContext`] and resolves to a batch or an
//! error. Most puzzles are described declaratively with [`StagedHarvest`] and run
//! by one generic driver; puzzles whose state is overwritten between stages use
//! [`ContinuousHarvest`].

mod continuous;
mod staged;

pub use continuous::{drive_continuous, ContinuousHarvest};
pub use staged::{drive_staged, StagedHarvest};

use crate::context::HarvestContext;
use crate::error::HarvestError;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use indexmap::IndexMap;
use keepsake_question::QuestionBatch;
use std::fmt;
use std::rc::Rc;

/// Future returned by a started task
pub type TaskFuture = LocalBoxFuture<'static, Result<QuestionBatch, HarvestError>>;

/// Something that can harvest one module type
pub trait HarvestTask {
    /// Start harvesting; the returned future owns `ctx`
    fn start(&self, ctx: HarvestContext) -> TaskFuture;
}

impl<F> HarvestTask for F
where
    F: Fn(HarvestContext) -> TaskFuture,
{
    fn start(&self, ctx: HarvestContext) -> TaskFuture {
        self(ctx)
    }
}

/// Runs a [`StagedHarvest`] definition
pub struct Staged<H>(Rc<H>);

impl<H: StagedHarvest> HarvestTask for Staged<H> {
    fn start(&self, ctx: HarvestContext) -> TaskFuture {
        drive_staged(Rc::clone(&self.0), ctx).boxed_local()
    }
}

/// Runs a [`ContinuousHarvest`] definition
pub struct Continuous<H>(Rc<H>);

impl<H: ContinuousHarvest> HarvestTask for Continuous<H> {
    fn start(&self, ctx: HarvestContext) -> TaskFuture {
        drive_continuous(Rc::clone(&self.0), ctx).boxed_local()
    }
}

/// Module type identifier to harvest task
#[derive(Default)]
pub struct TaskTable {
    tasks: IndexMap<String, Rc<dyn HarvestTask>>,
}

impl TaskTable {
    /// Empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task for `module_type`, replacing any previous one
    pub fn register(&mut self, module_type: impl Into<String>, task: impl HarvestTask + 'static) {
        self.tasks.insert(module_type.into(), Rc::new(task));
    }

    /// Register a staged definition under its own module type
    pub fn register_staged<H: StagedHarvest>(&mut self, definition: H) {
        let module_type = definition.module_type().to_string();
        self.register(module_type, Staged(Rc::new(definition)));
    }

    /// Register a continuous definition under its own module type
    pub fn register_continuous<H: ContinuousHarvest>(&mut self, definition: H) {
        let module_type = definition.module_type().to_string();
        self.register(module_type, Continuous(Rc::new(definition)));
    }

    /// Task for `module_type`
    #[must_use]
    pub fn get(&self, module_type: &str) -> Option<Rc<dyn HarvestTask>> {
        self.tasks.get(module_type).cloned()
    }

    /// Registered module types, in registration order
    pub fn module_types(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Number of registered module types
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl fmt::Debug for TaskTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tasks.keys()).finish()
    }
}
