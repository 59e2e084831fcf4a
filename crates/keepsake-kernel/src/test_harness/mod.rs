//! Test harness for driving the scheduler against a simulated host

pub mod simulator;

pub use simulator::{
    Script, ScriptAction, ScriptStep, SimulatedHost, Simulation, SimulationReport,
};
