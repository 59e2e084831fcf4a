//! Seeded demo bomb
//!
//! Puts one of every supported puzzle on a [`SimulatedHost`], scripts a plausible
//! playthrough (stage advances, a strike, field updates and solves) and runs the
//! harvester against it. A [`Fault`] can be injected to watch a task abandon.

use crate::catalog::supported;
use crate::config::HarvestConfig;
use crate::error::ConfigError;
use crate::harvester::Harvester;
use keepsake_accessor::{FieldValue, MemoryComponent};
use keepsake_kernel::test_harness::{Script, ScriptAction, SimulatedHost, Simulation, SimulationReport};
use keepsake_kernel::{CollectingSink, Host, ModuleRecord, TaskOutcome};
use keepsake_question::{ModuleId, QuestionCatalog, QuestionKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

pub mod components;

const SHAPES: &[&str] = &["Circle", "Square", "Triangle", "Star", "Heart", "Hexagon"];
const PREFABS: &[&str] = &["Wires", "The Button", "Keypad", "Simon Says", "Memory", "Maze"];
const WORDS: &[&str] = &["ANCHOR", "BRIDGE", "CASTLE", "DRAGON", "EMBERS", "FOREST"];
const INGREDIENTS: &[&str] = &["Flour", "Eggs", "Butter", "Sugar", "Milk", "Yeast", "Salt"];
const SYMBOLS: &[&str] = &["·", "‽", "¶", "§", "•", "⁂", "※", "¿"];

/// Tick by which every scripted solve has happened
pub const LAST_SOLVE: u64 = 40;

/// Fault injected into the demo bomb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Fault {
    /// Ice Cream's stage index drops back after the first customer
    StageRegression,
    /// The iPhone exposes a three-digit PIN
    ShortPin,
    /// Infinite Loop clears its selected word before the solve
    NullWord,
    /// The Impostor's module carries a component of the wrong type
    MissingComponent,
}

impl Fault {
    /// Command-line names, in declaration order
    pub const NAMES: [&'static str; 4] = [
        "stage-regression",
        "short-pin",
        "null-word",
        "missing-component",
    ];

    /// Command-line name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::StageRegression => Self::NAMES[0],
            Self::ShortPin => Self::NAMES[1],
            Self::NullWord => Self::NAMES[2],
            Self::MissingComponent => Self::NAMES[3],
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown fault name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fault '{0}'")]
pub struct UnknownFault(pub String);

impl FromStr for Fault {
    type Err = UnknownFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stage-regression" => Ok(Self::StageRegression),
            "short-pin" => Ok(Self::ShortPin),
            "null-word" => Ok(Self::NullWord),
            "missing-component" => Ok(Self::MissingComponent),
            other => Err(UnknownFault(other.to_string())),
        }
    }
}

/// Host, discovered modules and playthrough script
#[derive(Debug)]
pub struct DemoBomb {
    /// Simulated host holding every component
    pub host: Arc<SimulatedHost>,
    /// Modules in discovery order
    pub records: Vec<ModuleRecord>,
    /// Scripted playthrough
    pub script: Script,
}

struct Builder {
    host: Arc<SimulatedHost>,
    records: Vec<ModuleRecord>,
}

impl Builder {
    fn add(&mut self, module_type: &str, component: MemoryComponent) -> ModuleId {
        let id = ModuleId(u32::try_from(self.records.len() + 1).unwrap_or(u32::MAX));
        let display_name = supported(module_type).map_or(module_type, |m| m.display_name);
        let record = self.host.add_module(id, module_type, display_name, component);
        self.records.push(record);
        id
    }
}

fn pick<'a, R: Rng>(rng: &mut R, values: &[&'a str], amount: usize) -> Vec<&'a str> {
    values.choose_multiple(rng, amount).copied().collect()
}

fn index_below<R: Rng>(rng: &mut R, len: usize) -> i64 {
    i64::try_from(rng.gen_range(0..len.max(1))).unwrap_or(0)
}

fn indices<R: Rng>(rng: &mut R, len: usize, amount: usize) -> Vec<i64> {
    rand::seq::index::sample(rng, len, amount.min(len))
        .into_iter()
        .map(|i| i64::try_from(i).unwrap_or(0))
        .collect()
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

impl DemoBomb {
    /// Build the bomb for `seed`, answering from `catalog`
    #[must_use]
    pub fn build(seed: u64, fault: Option<Fault>, catalog: &QuestionCatalog) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bomb = Builder {
            host: SimulatedHost::new(),
            records: Vec::new(),
        };
        let mut script = Script::new().at(2, ScriptAction::Activate);
        let mut solves = Vec::new();

        // Ice Cream: three customers, served at ticks 10, 20 and 34
        let flavours = catalog.answers(QuestionKind::IceCreamFlavour).len();
        let customers = catalog.answers(QuestionKind::IceCreamCustomer).len();
        let options = (0..3).map(|_| indices(&mut rng, flavours, 5)).collect();
        let solution = (0..3).map(|_| index_below(&mut rng, 5)).collect();
        let served = indices(&mut rng, customers, 3);
        let ice_cream = bomb.add(
            "iceCreamModule",
            components::ice_cream(0, options, solution, served),
        );
        script = script
            .set_int(10, ice_cream, "CurrentStage", 1)
            .set_int(20, ice_cream, "CurrentStage", 2)
            .at(38, ScriptAction::Solve(ice_cream));
        script = if fault == Some(Fault::StageRegression) {
            script.set_int(22, ice_cream, "CurrentStage", 0)
        } else {
            script.set_int(34, ice_cream, "CurrentStage", 3)
        };

        let datasets = catalog.answers(QuestionKind::IdentificationCrisisDataset).len();
        let statics = components::crisis_statics(SHAPES);
        solves.push(bomb.add(
            "identificationCrisis",
            components::identification_crisis(
                &statics,
                indices(&mut rng, SHAPES.len(), 3),
                indices(&mut rng, datasets, 3),
            ),
        ));

        let hairs = catalog.answers(QuestionKind::IdentityParadeHairColors).to_vec();
        let builds = catalog.answers(QuestionKind::IdentityParadeBuilds).to_vec();
        let attires = catalog.answers(QuestionKind::IdentityParadeAttires).to_vec();
        solves.push(bomb.add(
            "identityParade",
            components::identity_parade(
                &pick(&mut rng, &as_strs(&hairs), 3),
                &pick(&mut rng, &as_strs(&builds), 3),
                &pick(&mut rng, &as_strs(&attires), 3),
            ),
        ));

        let impostor = if fault == Some(Fault::MissingComponent) {
            MemoryComponent::new("impostorModule")
        } else {
            components::impostor(PREFABS, index_below(&mut rng, PREFABS.len()))
        };
        solves.push(bomb.add("impostor", impostor));

        let word = WORDS.choose(&mut rng).copied().unwrap_or("ANCHOR");
        let infinite_loop = bomb.add("infiniteLoop", components::infinite_loop(word));
        solves.push(infinite_loop);
        if fault == Some(Fault::NullWord) {
            script = script.at(
                1,
                ScriptAction::SetField {
                    module: infinite_loop,
                    field: "SelectedWord".to_string(),
                    value: FieldValue::Null,
                },
            );
        }

        // Ingredients: some are used up shortly before the solve
        let initial = pick(&mut rng, INGREDIENTS, 5);
        let ingredients = bomb.add("ingredients", components::ingredients(&initial));
        script = script
            .at(
                25,
                ScriptAction::SetField {
                    module: ingredients,
                    field: "CurrentIngredientsList".to_string(),
                    value: components::string_seq(&initial[3..]),
                },
            )
            .at(28, ScriptAction::Solve(ingredients));

        let colours = catalog.answers(QuestionKind::InnerConnectionsLed).len();
        solves.push(bomb.add(
            "innerConnections",
            components::inner_connections(index_below(&mut rng, 10), index_below(&mut rng, colours)),
        ));

        // Interpunct: a strike during stage 1 replaces the symbol
        let symbols = pick(&mut rng, SYMBOLS, 4);
        let interpunct = bomb.add("interpunct", components::interpunct(1, symbols[0]));
        let set_symbol = |tick, symbol: &str, script: Script| {
            script.at(
                tick,
                ScriptAction::SetField {
                    module: interpunct,
                    field: "displaySymbol".to_string(),
                    value: FieldValue::Str(symbol.to_string()),
                },
            )
        };
        script = set_symbol(12, symbols[1], script).at(12, ScriptAction::Strike(interpunct));
        script = set_symbol(18, symbols[2], script).set_int(18, interpunct, "stage", 2);
        script = set_symbol(26, symbols[3], script).set_int(26, interpunct, "stage", 3);
        script = script.at(32, ScriptAction::Solve(interpunct));

        let cap = if rng.gen_bool(0.5) { 44 } else { 71 };
        solves.push(bomb.add(
            "ipa",
            components::ipa(71, cap, index_below(&mut rng, 44)),
        ));

        let pin_length = if fault == Some(Fault::ShortPin) { 3 } else { 4 };
        let digits: Vec<String> = (0..pin_length)
            .map(|_| rng.gen_range(0..10).to_string())
            .collect();
        let digits: Vec<&str> = digits.iter().map(String::as_str).collect();
        solves.push(bomb.add("iPhone", components::iphone(&digits)));

        let script = script.random_solves(seed, &solves, LAST_SOLVE);
        DemoBomb {
            host: bomb.host,
            records: bomb.records,
            script,
        }
    }
}

/// One question as the presentation layer would show it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedQuestion {
    /// Module asked about
    pub module: ModuleId,
    /// Question kind
    pub kind: QuestionKind,
    /// Template with arguments substituted
    pub text: String,
    /// Drawn options
    pub options: Vec<String>,
    /// Index of the correct option
    pub correct_index: usize,
}

/// Harvester running against a demo bomb
pub struct Demo {
    simulation: Simulation<CollectingSink>,
    catalog: Arc<QuestionCatalog>,
    answer_options: usize,
    seed: u64,
}

impl Demo {
    /// Build the bomb for `seed` and start a task for every module on it
    ///
    /// # Errors
    /// `Override` if the configuration names an unknown question kind
    pub fn new(config: &HarvestConfig, seed: u64, fault: Option<Fault>) -> Result<Self, ConfigError> {
        let catalog = Arc::new(config.catalog()?);
        let bomb = DemoBomb::build(seed, fault, &catalog);

        let host: Arc<dyn Host> = Arc::clone(&bomb.host) as Arc<dyn Host>;
        let mut harvester = Harvester::new(config, host, CollectingSink::new())?;
        let started = harvester.discover(&bomb.records);
        info!(seed, ?fault, modules = bomb.records.len(), started, "demo bomb ready");

        let simulation = Simulation::new(bomb.host, harvester.into_scheduler(), config.tick_interval())
            .with_script(bomb.script);
        Ok(Self {
            simulation,
            catalog,
            answer_options: config.answer_options,
            seed,
        })
    }

    /// Apply this tick's script actions and run one pass
    pub fn step(&mut self) -> Vec<TaskOutcome> {
        self.simulation.step()
    }

    /// Whether every task ended and the script is exhausted
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.simulation.is_finished()
    }

    /// Step as fast as possible until finished or `max_ticks`
    pub fn run(&mut self, max_ticks: u64) -> SimulationReport {
        self.simulation.run(max_ticks)
    }

    /// Step once per `period` of wall time until finished or `max_ticks`
    pub async fn run_paced(&mut self, period: Duration, max_ticks: u64) -> SimulationReport {
        // tokio rejects a zero period
        let mut ticker = interval(period.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        while self.simulation.tick() < max_ticks && !self.is_finished() {
            ticker.tick().await;
            self.step();
        }
        self.report()
    }

    /// Report of everything run so far
    #[must_use]
    pub fn report(&self) -> SimulationReport {
        self.simulation.report()
    }

    /// Collected batches and abandonments
    #[must_use]
    pub fn sink(&self) -> &CollectingSink {
        self.simulation.scheduler().sink()
    }

    /// Every collected question with options drawn for presentation
    ///
    /// Draws are seeded from the bomb seed, so repeated calls agree.
    #[must_use]
    pub fn rendered(&self) -> Vec<RenderedQuestion> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.sink()
            .batches
            .iter()
            .flat_map(|batch| batch.iter())
            .map(|question| {
                let text = self
                    .catalog
                    .info(question.kind())
                    .map_or_else(|| question.kind().to_string(), |info| info.render(question.format_args()));
                let drawn = question.select_answers(self.answer_options, &mut rng);
                RenderedQuestion {
                    module: question.module(),
                    kind: question.kind(),
                    text,
                    options: drawn.options,
                    correct_index: drawn.correct_index,
                }
            })
            .collect()
    }
}

impl fmt::Debug for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Demo")
            .field("seed", &self.seed)
            .field("answer_options", &self.answer_options)
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}
