#![allow(dead_code)]

use keepsake_accessor::MemoryComponent;
use keepsake_core::{supported, HarvestConfig, Harvester};
use keepsake_kernel::test_harness::{Script, SimulatedHost, Simulation, SimulationReport};
use keepsake_kernel::{CollectingSink, Host};
use keepsake_question::{ModuleId, Question};
use keepsake_test_utils::single_module;
use std::sync::Arc;

pub const MAX_TICKS: u64 = 500;

/// One pass and one poll every 10ms, so predicates are checked every tick
pub fn config() -> HarvestConfig {
    HarvestConfig::default()
        .with_tick_interval_ms(10)
        .with_poll_interval_ms(10)
}

/// Everything left over after harvesting a single module
pub struct Harvest {
    pub report: SimulationReport,
    pub sink: CollectingSink,
    pub host: Arc<SimulatedHost>,
    pub module: ModuleId,
}

impl Harvest {
    pub fn questions(&self) -> &[Question] {
        self.sink
            .batch_for(self.module)
            .map_or(&[], |batch| batch.questions())
    }

    pub fn abandon_reason(&self) -> Option<&str> {
        self.sink
            .abandonment_for(self.module)
            .map(|a| a.reason.as_str())
    }

    pub fn component(&self) -> Arc<MemoryComponent> {
        self.host.component(self.module).unwrap()
    }
}

pub fn correct(question: &Question) -> Vec<&str> {
    question
        .correct_answers()
        .iter()
        .map(String::as_str)
        .collect()
}

pub fn harvest_with(
    config: &HarvestConfig,
    module_type: &str,
    component: MemoryComponent,
    script: impl FnOnce(ModuleId) -> Script,
) -> Harvest {
    let display_name = supported(module_type).map_or(module_type, |m| m.display_name);
    let (host, record) = single_module(module_type, display_name, component);
    let shared: Arc<dyn Host> = Arc::clone(&host) as Arc<dyn Host>;

    let mut harvester = Harvester::new(config, shared, CollectingSink::new()).unwrap();
    harvester.start(&record).unwrap();

    let mut simulation =
        Simulation::new(Arc::clone(&host), harvester.into_scheduler(), config.tick_interval())
            .with_script(script(record.id));
    let report = simulation.run(MAX_TICKS);
    Harvest {
        report,
        sink: simulation.into_scheduler().into_sink(),
        host,
        module: record.id,
    }
}

pub fn harvest(
    module_type: &str,
    component: MemoryComponent,
    script: impl FnOnce(ModuleId) -> Script,
) -> Harvest {
    harvest_with(&config(), module_type, component, script)
}
