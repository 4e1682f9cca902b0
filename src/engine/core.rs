// src/engine/core.rs

//! Failure policy, kept free of Tokio so it can be tested directly.

use tracing::warn;

use crate::errors::{Result, UpdateFailure};
use crate::types::FailurePolicy;

/// Decide what a batch of observer failures means for the runtime.
///
/// - `Log`: every failure is logged with `warn!` and the runtime continues.
/// - `Exit`: the batch becomes `ScanwatchError::ObserverFailures`.
///
/// An empty batch is always `Ok`.
pub fn apply_failure_policy(failures: Vec<UpdateFailure>, policy: FailurePolicy) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }

    match policy {
        FailurePolicy::Log => {
            for failure in &failures {
                warn!(
                    observer = %failure.name,
                    id = %failure.id,
                    error = %failure.error,
                    "observer update failed"
                );
            }
            Ok(())
        }
        FailurePolicy::Exit => Err(failures.into()),
    }
}
