// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ScanwatchError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ScanwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_targets(cfg)?;
    validate_global_config(cfg)?;
    validate_targets(cfg)?;
    Ok(())
}

fn ensure_has_targets(cfg: &RawConfigFile) -> Result<()> {
    if cfg.target.is_empty() {
        return Err(ScanwatchError::ConfigError(
            "config must contain at least one [target.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    // on_failure is strongly typed and validated during deserialization.
    if cfg.config.interval_ms == 0 {
        return Err(ScanwatchError::ConfigError(
            "[config].interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_targets(cfg: &RawConfigFile) -> Result<()> {
    for (name, target) in cfg.target.iter() {
        if target.cmd.trim().is_empty() {
            return Err(ScanwatchError::ConfigError(format!(
                "target '{}' has an empty `cmd`",
                name
            )));
        }
        if target.paths.is_empty() {
            return Err(ScanwatchError::ConfigError(format!(
                "target '{}' must list at least one entry in `paths`",
                name
            )));
        }
        if target.paths.iter().any(|p| p.trim().is_empty()) {
            return Err(ScanwatchError::ConfigError(format!(
                "target '{}' has a blank entry in `paths`",
                name
            )));
        }
    }
    Ok(())
}
