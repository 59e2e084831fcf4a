//! Keepsake Core
//!
//! Harvest definitions for the supported puzzles and everything needed to run them:
//! - Declarative definitions per puzzle ([`modules`]), registered in [`harvest_table`]
//! - [`HarvestConfig`] loaded from TOML
//! - [`Harvester`], which starts a task per discovered module
//! - A seeded demo bomb ([`simulation`]) used by the `keepsake simulate` command
//!
//! # Example
//!
//! ```rust,ignore
//! use keepsake_core::{Harvester, HarvestConfig};
//! use keepsake_kernel::CollectingSink;
//!
//! let config = HarvestConfig::load(path)?;
//! let mut harvester = Harvester::new(&config, host, CollectingSink::new())?;
//! harvester.discover(&records);
//! harvester.run_until_idle(10_000);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod harvester;
pub mod modules;
pub mod simulation;

// Re-exports for convenience
pub use catalog::{harvest_table, supported, SupportedModule, SUPPORTED};
pub use config::HarvestConfig;
pub use error::ConfigError;
pub use harvester::Harvester;
pub use simulation::{Demo, DemoBomb, Fault, RenderedQuestion, UnknownFault};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
