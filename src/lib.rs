// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::{apply_failure_policy, run_blocking, Runtime, RuntimeEvent, RuntimeOptions};
use crate::exec::build_observers;
use crate::watch::Watcher;

pub use crate::errors::{ScanwatchError, UpdateFailure};
pub use crate::fs::{FileStat, MetadataProvider, RealFileSystem};
pub use crate::watch::{Observer, ObserverId, ObserverRef, ScanReport};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - one command observer per target
/// - the polling runtime (or a single `update_all` in `--once` mode)
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone();
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg, &config_root_dir(&config_path));
        return Ok(());
    }

    let root_dir = config_root_dir(&config_path);
    let mut watcher = Watcher::new();
    for observer in build_observers(&cfg, &root_dir) {
        watcher.register(Arc::new(observer));
    }
    info!(targets = watcher.len(), root = ?root_dir, "targets registered");

    if args.once {
        let on_failure = args.on_failure.unwrap_or(cfg.config.on_failure);
        let (_, failures) = run_blocking(watcher, |w| w.update_all()).await?;
        apply_failure_policy(failures, on_failure)?;
        return Ok(());
    }

    let options = runtime_options(&cfg, &args);

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(4);

    // Ctrl-C → graceful shutdown.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        let _ = rt_tx.send(RuntimeEvent::ShutdownRequested).await;
    });

    let summary = Runtime::new(watcher, options, rt_rx).run().await?;
    debug!(?summary, "runtime finished");
    Ok(())
}

/// Polling options from the config file, with CLI overrides applied.
pub fn runtime_options(cfg: &ConfigFile, args: &CliArgs) -> RuntimeOptions {
    RuntimeOptions {
        interval: args
            .interval_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| cfg.config.interval()),
        run_on_start: cfg.config.run_on_start,
        on_failure: args.on_failure.unwrap_or(cfg.config.on_failure),
        max_scans: None,
    }
}

/// Directory that relative target paths are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "configs/Scanwatch.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Scanwatch.toml" (parent = ""),
///   we fall back to the current working directory "."
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Simple dry-run output: print settings and targets.
fn print_dry_run(cfg: &ConfigFile, root: &Path) {
    println!("scanwatch dry-run");
    println!("  config.interval_ms = {}", cfg.config.interval_ms);
    println!("  config.run_on_start = {}", cfg.config.run_on_start);
    println!("  config.on_failure = {:?}", cfg.config.on_failure);
    println!();

    println!("targets ({}):", cfg.target.len());
    for (name, target) in cfg.target.iter() {
        println!("  - {name}");
        println!("      cmd: {}", target.cmd);
        for path in target.resolved_paths(root) {
            println!("      path: {}", path.display());
        }
    }

    debug!("dry-run complete (no execution)");
}
