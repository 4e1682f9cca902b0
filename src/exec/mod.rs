// src/exec/mod.rs

//! Process execution layer.
//!
//! [`command`] provides [`CommandObserver`], the observer the `scanwatch`
//! binary registers for every `[target.<name>]`. Commands run synchronously
//! inside `Watcher::scan`, so the next scan starts only after they exit.

pub mod command;

pub use command::{build_observers, CommandObserver};
