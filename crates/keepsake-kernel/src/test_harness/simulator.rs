//! Simulated host and tick scripts
//!
//! A [`SimulatedHost`] holds in-memory components and the host ends of every
//! module's lifecycle events. A [`Simulation`] replays a script of host actions
//! against it while stepping the scheduler, one pass per tick.

use crate::host::{signal_pair, Host, ModuleRecord, SignalSource};
use crate::scheduler::{QuestionSink, Scheduler, TaskOutcome, TaskStatus};
use indexmap::IndexMap;
use keepsake_accessor::{ComponentHandle, FieldValue, ForeignComponent, MemoryComponent};
use keepsake_question::ModuleId;
use parking_lot::RwLock;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

struct SimulatedModule {
    component: Arc<MemoryComponent>,
    signals: SignalSource,
}

/// In-process host backed by [`MemoryComponent`]s
#[derive(Default)]
pub struct SimulatedHost {
    activated: AtomicBool,
    modules: RwLock<IndexMap<ModuleId, SimulatedModule>>,
}

impl SimulatedHost {
    /// Host with the readiness gate closed and no modules
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Put a module on the bomb
    pub fn add_module(
        &self,
        id: ModuleId,
        module_type: impl Into<String>,
        display_name: impl Into<String>,
        component: MemoryComponent,
    ) -> ModuleRecord {
        let (source, signals) = signal_pair();
        self.modules.write().insert(
            id,
            SimulatedModule {
                component: Arc::new(component),
                signals: source,
            },
        );
        ModuleRecord {
            id,
            module_type: module_type.into(),
            display_name: display_name.into(),
            signals,
        }
    }

    /// Open the readiness gate
    pub fn activate(&self) {
        self.activated.store(true, Ordering::Relaxed);
    }

    /// Fire a module's solve event
    pub fn solve(&self, id: ModuleId) -> bool {
        self.with_module(id, |module| module.signals.solve())
    }

    /// Record a strike on a module
    pub fn strike(&self, id: ModuleId) -> bool {
        self.with_module(id, |module| module.signals.strike())
    }

    /// Overwrite a field on a module's component
    pub fn set_field(&self, id: ModuleId, field: &str, value: FieldValue) -> bool {
        self.modules
            .read()
            .get(&id)
            .is_some_and(|module| module.component.set_raw(field, value))
    }

    /// Component of a module, for inspection
    #[must_use]
    pub fn component(&self, id: ModuleId) -> Option<Arc<MemoryComponent>> {
        self.modules
            .read()
            .get(&id)
            .map(|module| Arc::clone(&module.component))
    }

    /// Modules on the bomb, in insertion order
    #[must_use]
    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.read().keys().copied().collect()
    }

    fn with_module(&self, id: ModuleId, action: impl FnOnce(&SimulatedModule)) -> bool {
        match self.modules.read().get(&id) {
            Some(module) => {
                action(module);
                true
            }
            None => false,
        }
    }
}

impl Host for SimulatedHost {
    fn is_activated(&self) -> bool {
        self.activated.load(Ordering::Relaxed)
    }

    fn find_component(&self, module: ModuleId, type_name: &str) -> Option<ComponentHandle> {
        let modules = self.modules.read();
        let component = &modules.get(&module)?.component;
        if component.type_name() == type_name {
            let handle: ComponentHandle = Arc::clone(component) as ComponentHandle;
            Some(handle)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for SimulatedHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedHost")
            .field("activated", &self.is_activated())
            .field("modules", &self.module_ids())
            .finish()
    }
}

/// Host action applied at the start of a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScriptAction {
    /// Open the readiness gate
    Activate,
    /// Overwrite a component field
    SetField {
        /// Target module
        module: ModuleId,
        /// Field name
        field: String,
        /// New value
        value: FieldValue,
    },
    /// Record a strike
    Strike(ModuleId),
    /// Fire the solve event
    Solve(ModuleId),
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptStep {
    /// Tick at which the action applies (1-based)
    pub tick: u64,
    /// What happens
    pub action: ScriptAction,
}

/// Ordered list of host actions
#[derive(Debug, Clone, Default)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    /// Empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action at `tick`
    #[must_use]
    pub fn at(mut self, tick: u64, action: ScriptAction) -> Self {
        self.push(tick, action);
        self
    }

    /// Add an action at `tick`
    pub fn push(&mut self, tick: u64, action: ScriptAction) {
        self.steps.push(ScriptStep { tick, action });
    }

    /// Set an integer field at `tick`
    #[must_use]
    pub fn set_int(self, tick: u64, module: ModuleId, field: &str, value: i64) -> Self {
        self.at(
            tick,
            ScriptAction::SetField {
                module,
                field: field.to_string(),
                value: FieldValue::Int(value),
            },
        )
    }

    /// Solve every module at a random tick in `1..=max_tick`
    #[must_use]
    pub fn random_solves(mut self, seed: u64, modules: &[ModuleId], max_tick: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        for module in modules {
            let tick = rng.gen_range(1..=max_tick.max(1));
            self.push(tick, ScriptAction::Solve(*module));
        }
        self
    }

    /// Steps sorted by tick, insertion order kept within a tick
    #[must_use]
    pub fn into_steps(mut self) -> Vec<ScriptStep> {
        self.steps.sort_by_key(|step| step.tick);
        self.steps
    }
}

/// Summary of a simulation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    /// Passes run
    pub ticks: u64,
    /// Every task outcome, in the order tasks ended
    pub outcomes: Vec<TaskOutcome>,
    /// Modules still live when the run stopped
    pub still_live: Vec<ModuleId>,
}

impl SimulationReport {
    /// Number of completed tasks
    #[must_use]
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }

    /// Number of abandoned tasks
    #[must_use]
    pub fn abandoned(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    /// Whether every task ended
    #[must_use]
    pub fn all_ended(&self) -> bool {
        self.still_live.is_empty()
    }

    /// Generate text report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Harvest Simulation Report ===\n\n");
        let _ = writeln!(report, "Ticks: {}", self.ticks);
        let _ = writeln!(report, "Completed: {}", self.completed());
        let _ = writeln!(report, "Abandoned: {}", self.abandoned());
        let _ = writeln!(report, "Still live: {}", self.still_live.len());
        report.push('\n');

        for outcome in &self.outcomes {
            match &outcome.status {
                TaskStatus::Completed { questions } => {
                    let _ = writeln!(
                        report,
                        "  {} {:<24} completed, {questions} question(s)",
                        outcome.module, outcome.module_type
                    );
                }
                TaskStatus::Abandoned { reason } => {
                    let _ = writeln!(
                        report,
                        "  {} {:<24} abandoned in {}: {reason}",
                        outcome.module, outcome.module_type, outcome.last_phase
                    );
                }
            }
        }
        report
    }
}

/// Host and scheduler stepped together under a script
pub struct Simulation<S> {
    host: Arc<SimulatedHost>,
    scheduler: Scheduler<S>,
    steps: Vec<ScriptStep>,
    cursor: usize,
    tick: u64,
    delta: Duration,
    outcomes: Vec<TaskOutcome>,
}

impl<S: QuestionSink> Simulation<S> {
    /// Simulation advancing `delta` per tick
    pub fn new(host: Arc<SimulatedHost>, scheduler: Scheduler<S>, delta: Duration) -> Self {
        Self {
            host,
            scheduler,
            steps: Vec::new(),
            cursor: 0,
            tick: 0,
            delta,
            outcomes: Vec::new(),
        }
    }

    /// Replace the script
    #[must_use]
    pub fn with_script(mut self, script: Script) -> Self {
        self.steps = script.into_steps();
        self.cursor = 0;
        self
    }

    /// Apply this tick's actions, then run one scheduler pass
    pub fn step(&mut self) -> Vec<TaskOutcome> {
        self.tick += 1;
        while let Some(step) = self.steps.get(self.cursor) {
            if step.tick > self.tick {
                break;
            }
            self.apply(&step.action);
            self.cursor += 1;
        }
        let outcomes = self.scheduler.tick(self.delta);
        self.outcomes.extend(outcomes.iter().cloned());
        outcomes
    }

    fn apply(&self, action: &ScriptAction) {
        debug!(tick = self.tick, ?action, "script action");
        match action {
            ScriptAction::Activate => self.host.activate(),
            ScriptAction::SetField {
                module,
                field,
                value,
            } => {
                self.host.set_field(*module, field, value.clone());
            }
            ScriptAction::Strike(module) => {
                self.host.strike(*module);
            }
            ScriptAction::Solve(module) => {
                self.host.solve(*module);
            }
        }
    }

    /// Step until every task ended and the script is exhausted, or `max_ticks`
    pub fn run(&mut self, max_ticks: u64) -> SimulationReport {
        while self.tick < max_ticks && !self.is_finished() {
            self.step();
        }
        self.report()
    }

    /// Whether every task ended and the script is exhausted
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.scheduler.is_idle() && self.cursor >= self.steps.len()
    }

    /// Ticks stepped so far
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Report of everything run so far
    #[must_use]
    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            ticks: self.tick,
            outcomes: self.outcomes.clone(),
            still_live: self.scheduler.live_tasks().map(|(id, _)| id).collect(),
        }
    }

    /// Scheduler under simulation
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }

    /// Simulated host
    #[must_use]
    pub fn host(&self) -> &Arc<SimulatedHost> {
        &self.host
    }

    /// Take the scheduler back
    #[must_use]
    pub fn into_scheduler(self) -> Scheduler<S> {
        self.scheduler
    }
}
