//! Error types for schedule loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during schedule definition loading
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read schedule file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schedule TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read schedule directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schedule definition in {path}: {reason}")]
    InvalidDefinition { path: PathBuf, reason: String },

    #[error("duplicate schedule id `{id}`")]
    DuplicateId { id: String },
}
