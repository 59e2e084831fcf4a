#![allow(dead_code)]

use keepsake_accessor::{Accessor, ComponentHandle, FieldDescriptor, MemoryComponent};
use keepsake_kernel::prelude::*;
use keepsake_kernel::test_harness::{SimulatedHost, Simulation};
use keepsake_question::{ModuleId, QuestionCatalog};
use std::sync::Arc;
use std::time::Duration;

pub const DELTA: Duration = Duration::from_millis(10);

/// Three-stage definition reading `stage` and capturing `word` per stage
pub struct Stepper;

impl StagedHarvest for Stepper {
    type Fields = (Accessor<i64>, Accessor<String>);
    type Snapshot = String;

    fn module_type(&self) -> &'static str {
        "stepper"
    }

    fn component_type(&self) -> &'static str {
        "StepperModule"
    }

    fn stage_count(&self) -> u32 {
        3
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok((
            FieldDescriptor::field("stage").resolve(component)?,
            FieldDescriptor::field("word").resolve(component)?,
        ))
    }

    fn stage_index(&self, fields: &Self::Fields) -> Result<i64, HarvestError> {
        Ok(fields.0.get()?)
    }

    fn snapshot(
        &self,
        fields: &Self::Fields,
        _stage: u32,
        _ctx: &HarvestContext,
    ) -> Result<String, HarvestError> {
        Ok(fields.1.get()?)
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        snapshots: Vec<String>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let _final_word = fields.1.get()?;
        ctx.add_questions(snapshots.into_iter().enumerate().map(|(i, word)| {
            QuestionBuilder::new(QuestionKind::InterpunctDisplay)
                .format_arg(ordinal(u32::try_from(i + 1).unwrap()))
                .correct(word)
        }))
    }
}

/// Zero-stage definition reading `word` after the solve
pub struct Reader;

impl StagedHarvest for Reader {
    type Fields = Accessor<String>;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "reader"
    }

    fn component_type(&self) -> &'static str {
        "ReaderModule"
    }

    fn waits_for_activation(&self) -> bool {
        true
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok(FieldDescriptor::field("word").resolve(component)?)
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let word = fields.get()?;
        ctx.add_question(QuestionBuilder::new(QuestionKind::InfiniteLoopSelectedWord).correct(word))
    }
}

/// Continuous definition over a 1-based `stage` and a `symbol`
pub struct Pulse;

impl ContinuousHarvest for Pulse {
    type Fields = (Accessor<i64>, Accessor<String>);
    type Sample = String;

    fn module_type(&self) -> &'static str {
        "pulse"
    }

    fn component_type(&self) -> &'static str {
        "PulseModule"
    }

    fn phase_count(&self) -> u32 {
        3
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok((
            FieldDescriptor::field("stage").resolve(component)?,
            FieldDescriptor::field("symbol").resolve(component)?,
        ))
    }

    fn phase(&self, fields: &Self::Fields) -> Result<u32, HarvestError> {
        let stage = fields.0.get_in_range(1, 3)?;
        Ok(u32::try_from(stage).unwrap_or_default())
    }

    fn sample(&self, fields: &Self::Fields) -> Result<String, HarvestError> {
        Ok(fields.1.get()?)
    }

    fn finalize(
        &self,
        _fields: Self::Fields,
        samples: Vec<Option<String>>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let mut builders = Vec::new();
        for (i, sample) in samples.into_iter().enumerate() {
            let n = u32::try_from(i + 1).unwrap_or_default();
            let symbol = sample.ok_or_else(|| HarvestError::MissingObservation {
                what: format!("stage {n}"),
            })?;
            builders.push(
                QuestionBuilder::new(QuestionKind::InterpunctDisplay)
                    .format_arg(ordinal(n))
                    .correct(symbol),
            );
        }
        ctx.add_questions(builders)
    }
}

pub fn task_table() -> TaskTable {
    let mut tasks = TaskTable::new();
    tasks.register_staged(Stepper);
    tasks.register_staged(Reader);
    tasks.register_continuous(Pulse);
    tasks
}

pub fn scheduler(host: &Arc<SimulatedHost>) -> Scheduler<CollectingSink> {
    let host: Arc<dyn Host> = Arc::clone(host) as Arc<dyn Host>;
    Scheduler::new(
        host,
        Arc::new(QuestionCatalog::builtin()),
        task_table(),
        CollectingSink::new(),
    )
    .with_config(SchedulerConfig::default().with_poll_interval(DELTA))
}

pub fn stepper_component(stage: i64) -> MemoryComponent {
    MemoryComponent::new("StepperModule")
        .with_field("stage", stage)
        .with_field("word", "alpha".to_string())
}

/// Host with one module of `module_type`, started on a fresh scheduler
pub fn single(
    module_type: &str,
    component: MemoryComponent,
) -> (Arc<SimulatedHost>, Simulation<CollectingSink>, ModuleId) {
    let host = SimulatedHost::new();
    let id = ModuleId(1);
    let record = host.add_module(id, module_type, module_type, component);
    let mut scheduler = scheduler(&host);
    scheduler.start(&record).unwrap();
    let simulation = Simulation::new(Arc::clone(&host), scheduler, DELTA);
    (host, simulation, id)
}
