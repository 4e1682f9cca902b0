// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::errors::Result;
use crate::fs::MetadataProvider;
use crate::watch::Watcher;

use super::core::apply_failure_policy;
use super::{RunSummary, RuntimeEvent, RuntimeOptions};

/// Run `op` against `watcher` on Tokio's blocking pool and hand the watcher
/// back together with the result.
///
/// Scans stat files and observers may run commands; neither may stall the
/// async worker that drives the loop.
pub async fn run_blocking<F, T, Op>(watcher: Watcher<F>, op: Op) -> Result<(Watcher<F>, T)>
where
    F: MetadataProvider + 'static,
    T: Send + 'static,
    Op: FnOnce(&mut Watcher<F>) -> T + Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || {
        let mut watcher = watcher;
        let out = op(&mut watcher);
        (watcher, out)
    })
    .await
    .map_err(anyhow::Error::from)?;
    Ok(joined)
}

/// Drives a [`Watcher`] on a fixed interval until shutdown.
///
/// Each scan, and the observer updates it triggers, runs on the blocking pool
/// and is awaited before the next tick, so a slow observer delays the next
/// scan instead of overlapping with it.
pub struct Runtime<F: MetadataProvider> {
    watcher: Watcher<F>,
    options: RuntimeOptions,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl<F: MetadataProvider> fmt::Debug for Runtime<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("watcher", &self.watcher)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<F: MetadataProvider + 'static> Runtime<F> {
    pub fn new(
        watcher: Watcher<F>,
        options: RuntimeOptions,
        event_rx: mpsc::Receiver<RuntimeEvent>,
    ) -> Self {
        Self {
            watcher,
            options,
            event_rx,
        }
    }

    /// Main loop.
    ///
    /// - Optionally runs every observer once (`run_on_start`).
    /// - Scans on every tick; the first scan records the baseline.
    /// - Stops on `ShutdownRequested`, a closed event channel, `max_scans`,
    ///   or an observer failure under `FailurePolicy::Exit`.
    pub async fn run(self) -> Result<RunSummary> {
        let Runtime {
            mut watcher,
            options,
            mut event_rx,
        } = self;
        let mut summary = RunSummary::default();

        info!(
            observers = watcher.len(),
            interval = ?options.interval,
            "scanwatch runtime started"
        );

        if options.run_on_start {
            let (returned, failures) = run_blocking(watcher, |w| w.update_all()).await?;
            watcher = returned;
            summary.notifications += watcher.len();
            summary.failures += failures.len();
            apply_failure_policy(failures, options.on_failure)?;
        }

        let mut ticker = time::interval(options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let (returned, report) = run_blocking(watcher, |w| w.scan()).await?;
                    watcher = returned;
                    summary.scans += 1;
                    summary.notifications += report.notified.len();
                    summary.failures += report.failures.len();

                    if report.changed {
                        info!(notified = report.notified.len(), "changes detected");
                    }
                    apply_failure_policy(report.failures, options.on_failure)?;

                    if options.max_scans.is_some_and(|max| summary.scans >= max) {
                        debug!(scans = summary.scans, "scan limit reached");
                        break;
                    }
                }
                event = event_rx.recv() => {
                    match event {
                        Some(RuntimeEvent::ShutdownRequested) => {
                            info!("shutdown requested; stopping runtime");
                        }
                        None => {
                            info!("runtime event channel closed; exiting");
                        }
                    }
                    break;
                }
            }
        }

        info!(scans = summary.scans, "scanwatch runtime stopped");
        Ok(summary)
    }
}
