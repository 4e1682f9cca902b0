// src/exec/command.rs

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::config::ConfigFile;
use crate::watch::Observer;

/// Observer that runs a shell command whenever one of its paths changes.
#[derive(Debug, Clone)]
pub struct CommandObserver {
    name: String,
    cmd: String,
    paths: Vec<PathBuf>,
    workdir: PathBuf,
}

impl CommandObserver {
    pub fn new(
        name: impl Into<String>,
        cmd: impl Into<String>,
        paths: Vec<PathBuf>,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into(),
            paths,
            workdir: workdir.into(),
        }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Build a shell command appropriate for the platform.
    fn shell_command(&self) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        };
        cmd.current_dir(&self.workdir);
        cmd
    }
}

impl Observer for CommandObserver {
    fn paths(&self) -> Vec<PathBuf> {
        self.paths.clone()
    }

    fn on_updated(&self) -> Result<()> {
        info!(target_name = %self.name, cmd = %self.cmd, "running command");

        let status = self
            .shell_command()
            .status()
            .with_context(|| format!("spawning process for target '{}'", self.name))?;

        if !status.success() {
            match status.code() {
                Some(code) => bail!("command `{}` exited with code {}", self.cmd, code),
                None => bail!("command `{}` was terminated by a signal", self.cmd),
            }
        }

        debug!(target_name = %self.name, "command finished");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// One [`CommandObserver`] per configured target, with paths resolved against
/// `root`.
pub fn build_observers(cfg: &ConfigFile, root: &Path) -> Vec<CommandObserver> {
    cfg.target
        .iter()
        .map(|(name, target)| {
            CommandObserver::new(
                name.clone(),
                target.cmd.clone(),
                target.resolved_paths(root),
                root,
            )
        })
        .collect()
}
