#![allow(dead_code)]

use std::collections::BTreeMap;
use scanwatch::config::{ConfigFile, ConfigSection, RawConfigFile, TargetConfig};
use scanwatch::types::FailurePolicy;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                target: BTreeMap::new(),
            },
        }
    }

    pub fn with_target(mut self, name: &str, target: TargetConfig) -> Self {
        self.config.target.insert(name.to_string(), target);
        self
    }

    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.config.config.interval_ms = ms;
        self
    }

    pub fn run_on_start(mut self, val: bool) -> Self {
        self.config.config.run_on_start = val;
        self
    }

    pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
        self.config.config.on_failure = policy;
        self
    }

    /// The raw config, for tests that exercise validation failures.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TargetConfig`.
pub struct TargetConfigBuilder {
    target: TargetConfig,
}

impl TargetConfigBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            target: TargetConfig {
                cmd: cmd.to_string(),
                paths: vec![],
            },
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.target.paths.push(path.to_string());
        self
    }

    pub fn build(self) -> TargetConfig {
        self.target
    }
}
