// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Tracking registered observers by identity (`observer.rs`).
//! - Keeping a per-path modification-time snapshot (`index.rs`).
//! - Diffing each scan against the previous one and notifying the
//!   observers whose paths changed (`watcher.rs`).
//!
//! It does **not** decide when to scan; callers drive [`Watcher::scan`]
//! from their own loop (see `engine::Runtime`).

pub mod index;
pub mod observer;
pub mod watcher;

pub use index::{PathIndex, PathRecord};
pub use observer::{Observer, ObserverId, ObserverRef, ObserverRegistry};
pub use watcher::{ScanReport, Watcher};
