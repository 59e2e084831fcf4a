//! Keepsake Kernel
//!
//! Cooperative harvest tasks and the scheduler that runs them.
//!
//! # Architecture
//!
//! 1. **Tasks**: one future per discovered module, owning a [`HarvestContext`];
//!    tasks read foreign state through accessors and suspend on wait primitives
//! 2. **Scheduler**: polls every live task once per pass, in registration order,
//!    and forwards each result to a [`QuestionSink`]
//!
//! Everything runs on one thread. A task only yields at a wait primitive, so no
//! framework state needs locking, and a task can only end itself.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use keepsake_kernel::prelude::*;
//!
//! let mut tasks = TaskTable::new();
//! tasks.register_staged(IceCream);
//!
//! let mut scheduler = Scheduler::new(host, catalog, tasks, CollectingSink::new());
//! scheduler.start(&record)?;
//! scheduler.run_until_idle(Duration::from_millis(16), 10_000);
//! ```

pub mod context;
pub mod error;
pub mod host;
pub mod scheduler;
pub mod state_machine;
pub mod task;
pub mod wait;

// Test harness
pub mod test_harness;

// Re-exports
pub use context::HarvestContext;
pub use error::{HarvestError, PhaseError, SchedulerError};
pub use host::{signal_pair, Host, ModuleRecord, ModuleSignals, SignalSource, StrikeWatch};
pub use scheduler::{
    Abandonment, CollectingSink, QuestionSink, Scheduler, SchedulerConfig, TaskOutcome, TaskStatus,
};
pub use state_machine::HarvestPhase;
pub use task::{
    drive_continuous, drive_staged, ContinuousHarvest, HarvestTask, StagedHarvest, TaskFuture,
    TaskTable,
};
pub use wait::{next_tick, Clock};

/// Common imports for writing harvest definitions
pub mod prelude {
    pub use crate::context::HarvestContext;
    pub use crate::error::HarvestError;
    pub use crate::host::{Host, ModuleRecord};
    pub use crate::scheduler::{CollectingSink, QuestionSink, Scheduler, SchedulerConfig};
    pub use crate::state_machine::HarvestPhase;
    pub use crate::task::{ContinuousHarvest, StagedHarvest, TaskTable};
    pub use keepsake_accessor::prelude::*;
    pub use keepsake_question::{ordinal, QuestionBuilder, QuestionKind};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
