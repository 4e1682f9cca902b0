// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::watch::ObserverId;

#[derive(Error, Debug)]
pub enum ScanwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{count} observer update(s) failed; first: {first}")]
    ObserverFailures { count: usize, first: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure reported by an observer's `on_updated`.
///
/// Collected by `Watcher::scan` and `Watcher::update_all` instead of being
/// propagated, so one failing observer never prevents the rest from running.
#[derive(Error, Debug)]
#[error("observer '{name}' ({id}) failed to update: {error:#}")]
pub struct UpdateFailure {
    pub id: ObserverId,
    pub name: String,
    pub error: anyhow::Error,
}

impl From<Vec<UpdateFailure>> for ScanwatchError {
    fn from(failures: Vec<UpdateFailure>) -> Self {
        ScanwatchError::ObserverFailures {
            count: failures.len(),
            first: failures
                .first()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ScanwatchError>;
