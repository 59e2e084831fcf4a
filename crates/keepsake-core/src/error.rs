//! Error types for Keepsake Core

use keepsake_question::QuestionError;
use std::path::PathBuf;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`HarvestConfig`](crate::HarvestConfig)
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A zero tick would never advance the logical clock
    #[error("tick_interval_ms must be at least 1")]
    ZeroTickInterval,

    /// An answer override names an unknown question kind
    #[error("invalid answer override: {0}")]
    Override(#[from] QuestionError),
}
