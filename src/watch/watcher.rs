// src/watch/watcher.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::errors::UpdateFailure;
use crate::fs::{MetadataProvider, RealFileSystem};
use crate::watch::index::PathIndex;
use crate::watch::observer::{Observer, ObserverId, ObserverRef, ObserverRegistry};

/// Outcome of a single [`Watcher::scan`].
#[derive(Debug, Default)]
pub struct ScanReport {
    /// True if at least one observer was notified.
    pub changed: bool,
    /// Observers notified by this scan, in registration order.
    pub notified: Vec<ObserverId>,
    /// Failures returned by notified observers.
    pub failures: Vec<UpdateFailure>,
}

/// Polling change detector.
///
/// Observers are registered with [`register`](Watcher::register). Each call
/// to [`scan`](Watcher::scan) asks every observer for its paths, stats them
/// through the [`MetadataProvider`] and calls `on_updated` synchronously on
/// every observer with a path that was modified, or that appeared after
/// being declared in an earlier scan. Files that already exist the first time
/// a path is seen only establish a baseline.
///
/// The watcher keeps no locks of its own; all mutating operations take
/// `&mut self`.
#[derive(Debug)]
pub struct Watcher<F: MetadataProvider = RealFileSystem> {
    fs: F,
    observers: ObserverRegistry,
    index: PathIndex,
}

impl Default for Watcher<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl Watcher<RealFileSystem> {
    pub fn new() -> Self {
        Self::with_fs(RealFileSystem)
    }
}

impl<F: MetadataProvider> Watcher<F> {
    /// Create a watcher that reads metadata through `fs`.
    pub fn with_fs(fs: F) -> Self {
        Self {
            fs,
            observers: ObserverRegistry::new(),
            index: PathIndex::new(),
        }
    }

    /// Read-only view of the path snapshot left by the last scan.
    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    /// Register an observer for successive scans.
    ///
    /// Registering an already registered observer returns its existing id.
    pub fn register(&mut self, observer: ObserverRef) -> ObserverId {
        let id = self.observers.register(observer);
        trace!(%id, "observer registered");
        id
    }

    /// Stop observing. Paths only this observer declared are dropped from
    /// the index on the next scan.
    pub fn unregister<O: Observer + ?Sized>(&mut self, observer: &Arc<O>) -> bool {
        match self.observers.unregister(observer) {
            Some(id) => {
                trace!(%id, "observer unregistered");
                true
            }
            None => false,
        }
    }

    pub fn unregister_id(&mut self, id: ObserverId) -> Option<ObserverRef> {
        self.observers.remove(id)
    }

    /// True if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check every declared path and notify the observers whose paths changed.
    ///
    /// Each observer is notified at most once per scan. Failures are
    /// collected in the report; every selected observer is still notified.
    pub fn scan(&mut self) -> ScanReport {
        self.index.begin_scan();

        let mut declared = 0usize;
        for (id, observer) in self.observers.iter() {
            for path in observer.paths() {
                declared += 1;
                self.index.visit(&path, id, &self.fs);
            }
        }

        let pruned = self.index.prune();
        let targets = self.index.changed_observers();

        debug!(
            observers = self.observers.len(),
            declared,
            tracked = self.index.len(),
            pruned,
            notify = targets.len(),
            "scan complete"
        );

        let failures = self.notify(&targets);

        ScanReport {
            changed: !targets.is_empty(),
            notified: targets.into_iter().collect(),
            failures,
        }
    }

    /// Call `on_updated` on every registered observer.
    ///
    /// Does not read or modify the path index, so a following scan may still
    /// report changes.
    pub fn update_all(&self) -> Vec<UpdateFailure> {
        let all: BTreeSet<ObserverId> = self.observers.iter().map(|(id, _)| id).collect();
        self.notify(&all)
    }

    fn notify(&self, targets: &BTreeSet<ObserverId>) -> Vec<UpdateFailure> {
        let mut failures = Vec::new();
        for id in targets {
            let Some(observer) = self.observers.get(*id) else {
                continue;
            };
            debug!(%id, observer = observer.name(), "notifying observer");
            if let Err(error) = observer.on_updated() {
                failures.push(UpdateFailure {
                    id: *id,
                    name: observer.name().to_string(),
                    error,
                });
            }
        }
        failures
    }
}
