// src/config/model.rs

use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::types::FailurePolicy;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// interval_ms = 500
/// run_on_start = false
/// on_failure = "log"
///
/// [target.site]
/// cmd = "make site"
/// paths = ["index.md", "style.css"]
/// ```
///
/// This is the unvalidated form; convert it with `ConfigFile::try_from`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All targets from `[target.<name>]`, keyed by name.
    #[serde(default)]
    pub target: BTreeMap<String, TargetConfig>,
}

/// A validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>`, so holding one means
/// every target has a command and at least one path.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    inner: RawConfigFile,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self { inner: raw }
    }
}

impl Deref for ConfigFile {
    type Target = RawConfigFile;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Time between two scans, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Run every target once before the first scan.
    #[serde(default)]
    pub run_on_start: bool,

    /// `"log"` (default) or `"exit"`.
    #[serde(default)]
    pub on_failure: FailurePolicy,
}

fn default_interval_ms() -> u64 {
    500
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            run_on_start: false,
            on_failure: FailurePolicy::default(),
        }
    }
}

impl ConfigSection {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// `[target.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Shell command to run when one of `paths` changes.
    pub cmd: String,

    /// Files this target depends on. Relative paths are resolved against the
    /// directory containing the config file.
    #[serde(default)]
    pub paths: Vec<String>,
}

impl TargetConfig {
    /// `paths` resolved against `root`.
    pub fn resolved_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.paths
            .iter()
            .map(|p| {
                let p = Path::new(p);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    root.join(p)
                }
            })
            .collect()
    }
}
