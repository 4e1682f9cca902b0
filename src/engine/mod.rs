// src/engine/mod.rs

//! Polling loop around the scan engine.
//!
//! The watcher itself never decides when to scan. This module provides the
//! loop the `scanwatch` binary uses: a fixed-interval ticker that calls
//! `Watcher::scan`, applies the configured [`FailurePolicy`] to whatever the
//! observers report, and stops on a shutdown request.
//!
//! Failure handling lives in [`core`]; the async shell is in [`runtime`].

use std::time::Duration;

pub use crate::types::FailurePolicy;

/// Options for [`Runtime`].
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Time between two scans. The first scan happens immediately.
    pub interval: Duration,
    /// Call `update_all` once before the first scan.
    pub run_on_start: bool,
    /// What to do with observer failures.
    pub on_failure: FailurePolicy,
    /// Stop after this many scans (used by tests; `None` runs until shutdown).
    pub max_scans: Option<u64>,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            run_on_start: false,
            on_failure: FailurePolicy::Log,
            max_scans: None,
        }
    }
}

/// Events flowing into the runtime from outside the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Counters accumulated over one [`Runtime::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scans: u64,
    pub notifications: usize,
    pub failures: usize,
}

pub mod core;
pub mod runtime;

pub use self::core::apply_failure_policy;
pub use runtime::{run_blocking, Runtime};
