//! Harvester facade
//!
//! Wires configuration, the built-in catalog and the supported task table into a
//! [`Scheduler`], and accepts modules as the host discovers them.

use crate::catalog::harvest_table;
use crate::config::HarvestConfig;
use crate::error::ConfigError;
use keepsake_kernel::{Host, ModuleRecord, QuestionSink, Scheduler, SchedulerError, TaskOutcome};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Runs harvest tasks for every discovered module
pub struct Harvester<S> {
    scheduler: Scheduler<S>,
    tick_interval: Duration,
}

impl<S: QuestionSink> Harvester<S> {
    /// Create a harvester for `host`, forwarding results to `sink`
    ///
    /// # Errors
    /// `Override` if the configuration names an unknown question kind
    pub fn new(config: &HarvestConfig, host: Arc<dyn Host>, sink: S) -> Result<Self, ConfigError> {
        let catalog = Arc::new(config.catalog()?);
        let scheduler =
            Scheduler::new(host, catalog, harvest_table(), sink).with_config(config.scheduler());
        Ok(Self {
            scheduler,
            tick_interval: config.tick_interval(),
        })
    }

    /// Start the task for one module
    ///
    /// # Errors
    /// `DuplicateModule` or `NoDefinition` from the scheduler
    pub fn start(&mut self, record: &ModuleRecord) -> Result<(), SchedulerError> {
        self.scheduler.start(record)
    }

    /// Start tasks for every record; unsupported and duplicate modules are skipped
    ///
    /// Returns the number of tasks started.
    pub fn discover<'a>(&mut self, records: impl IntoIterator<Item = &'a ModuleRecord>) -> usize {
        let mut started = 0;
        for record in records {
            match self.scheduler.start(record) {
                Ok(()) => started += 1,
                Err(SchedulerError::NoDefinition(module_type)) => {
                    debug!(module = %record.id, %module_type, "no harvest for module type");
                }
                Err(err) => warn!(module = %record.id, error = %err, "module skipped"),
            }
        }
        started
    }

    /// Run one scheduler pass of the configured tick length
    pub fn tick(&mut self) -> Vec<TaskOutcome> {
        self.scheduler.tick(self.tick_interval)
    }

    /// Tick until every task ended or `max_ticks` passes ran
    pub fn run_until_idle(&mut self, max_ticks: u64) -> Vec<TaskOutcome> {
        self.scheduler.run_until_idle(self.tick_interval, max_ticks)
    }

    /// Underlying scheduler
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }

    /// Take the scheduler, e.g. to drive it under a simulation
    #[must_use]
    pub fn into_scheduler(self) -> Scheduler<S> {
        self.scheduler
    }
}

impl<S> std::fmt::Debug for Harvester<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harvester")
            .field("scheduler", &self.scheduler)
            .field("tick_interval", &self.tick_interval)
            .finish()
    }
}
