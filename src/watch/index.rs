// src/watch/index.rs

//! Per-path snapshot state used to diff one scan against the previous one.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::fs::{FileStat, MetadataProvider};
use crate::watch::observer::ObserverId;

/// Snapshot of one path.
#[derive(Debug, Default)]
pub struct PathRecord {
    last: FileStat,
    visited: bool,
    changed: bool,
    interested: HashSet<ObserverId>,
}

impl PathRecord {
    /// Metadata recorded by the most recent scan that visited this path.
    pub fn last_stat(&self) -> FileStat {
        self.last
    }

    /// Observers that declared this path during the most recent scan.
    pub fn interested(&self) -> &HashSet<ObserverId> {
        &self.interested
    }

    /// Whether the most recent scan flagged this path as changed.
    pub fn changed(&self) -> bool {
        self.changed
    }
}

/// Mapping from declared path to its [`PathRecord`].
///
/// The index is driven by `Watcher::scan` in three phases:
/// [`begin_scan`](PathIndex::begin_scan), one [`visit`](PathIndex::visit)
/// per declared `(observer, path)` pair, then [`prune`](PathIndex::prune).
#[derive(Debug, Default)]
pub struct PathIndex {
    records: HashMap<PathBuf, PathRecord>,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the per-scan flags on every record.
    pub fn begin_scan(&mut self) {
        for record in self.records.values_mut() {
            record.visited = false;
            record.changed = false;
        }
    }

    /// Record that `observer` declared `path` in the current scan.
    ///
    /// The first visit of a path in a scan stats it and compares the result
    /// with the stored snapshot; later visits only add interest.
    pub fn visit<F>(&mut self, path: &Path, observer: ObserverId, fs: &F)
    where
        F: MetadataProvider + ?Sized,
    {
        let known_before = self.records.contains_key(path);
        let record = self.records.entry(path.to_path_buf()).or_default();

        if record.visited {
            record.interested.insert(observer);
            return;
        }

        record.visited = true;
        record.interested.clear();
        record.interested.insert(observer);

        let fresh = fs.stat(path);
        record.changed = match (fresh, record.last) {
            (FileStat::Exists(now), FileStat::Exists(before)) => now != before,
            // Only a path the index already knew about counts as "appeared";
            // a brand-new record just takes its baseline.
            (FileStat::Exists(_), FileStat::Absent) => known_before,
            (FileStat::Absent, _) => false,
        };
        if record.changed {
            trace!(?path, ?fresh, previous = ?record.last, "path changed");
        }
        record.last = fresh;
    }

    /// Drop every record not visited since the last `begin_scan`.
    ///
    /// Returns the number of records removed.
    pub fn prune(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| record.visited);
        before - self.records.len()
    }

    /// Union of the interest sets of all changed records.
    pub fn changed_observers(&self) -> BTreeSet<ObserverId> {
        self.records
            .values()
            .filter(|record| record.changed)
            .flat_map(|record| record.interested.iter().copied())
            .collect()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&PathRecord> {
        self.records.get(path.as_ref())
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.records.contains_key(path.as_ref())
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.records.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
