//! Harvest configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file is valid.
//!
//! ```toml
//! tick_interval_ms = 16
//! poll_interval_ms = 100
//! answer_options = 6
//! log_filter = "keepsake=debug"
//!
//! [answer_overrides]
//! IceCreamCustomer = ["Ann", "Bo", "Cy", "Di"]
//! ```

use crate::error::ConfigError;
use keepsake_kernel::SchedulerConfig;
use keepsake_question::{QuestionCatalog, QuestionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Simulated frame length per scheduler pass
    pub tick_interval_ms: u64,
    /// Cadence of polling predicate waits
    pub poll_interval_ms: u64,
    /// Options drawn per question by the presentation layer
    pub answer_options: usize,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Replacement answer domains, keyed by question kind name
    pub answer_overrides: BTreeMap<String, Vec<String>>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            poll_interval_ms: 100,
            answer_options: 6,
            log_filter: "keepsake=info".to_string(),
            answer_overrides: BTreeMap::new(),
        }
    }
}

impl HarvestConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// `Parse` on malformed TOML or unknown fields of the wrong type,
    /// `ZeroTickInterval` if `tick_interval_ms` is 0
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot drive a harvest
    ///
    /// # Errors
    /// `ZeroTickInterval` if `tick_interval_ms` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml`]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// With tick interval
    #[inline]
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// With polling interval
    #[inline]
    #[must_use]
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// With an answer domain override for `kind`
    #[must_use]
    pub fn with_answer_override(mut self, kind: QuestionKind, answers: Vec<String>) -> Self {
        self.answer_overrides.insert(kind.name().to_string(), answers);
        self
    }

    /// Simulated frame length, never shorter than 1ms
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Scheduler settings derived from this configuration
    #[must_use]
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig::default().with_poll_interval(Duration::from_millis(self.poll_interval_ms))
    }

    /// Built-in catalog with the answer overrides applied
    ///
    /// # Errors
    /// `Override` if an override names an unknown kind
    pub fn catalog(&self) -> Result<QuestionCatalog, ConfigError> {
        let mut catalog = QuestionCatalog::builtin();
        for (name, answers) in &self.answer_overrides {
            let kind: QuestionKind = name.parse()?;
            catalog = catalog.with_answers(kind, answers.clone());
        }
        Ok(catalog)
    }
}
