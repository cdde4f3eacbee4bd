//! studyxp - progress engine for self-study tracking
//!
//! Turns study activity (lessons completed, problems solved, practice
//! sessions) into experience points, levels, titles, daily streaks and
//! achievements, and keeps that state durably between sessions.
//!
//! ## Layout
//!
//! - [`progress`]: the engine. [`progress::ProgressStore`] owns all state and
//!   exposes every mutation; the rules it applies live in small pure modules.
//! - [`persistence`]: versioned JSON documents with forward migrations, stored
//!   in SQLite, a directory of JSON files, or memory.
//! - [`config`]: `~/.studyxp/config.toml`.

pub mod config;
pub mod persistence;
pub mod progress;

pub use progress::{ProgressStore, XpAward};
