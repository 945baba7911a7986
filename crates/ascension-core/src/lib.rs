//! Ascension Core - Progress Tracker Engine
//!
//! Holds everything the player enters (material counts, collected
//! sections, resin, pull counters) and runs the pure logic from
//! `ascension-logic` over it.
//!
//! # Architecture
//!
//! - **Stores**: explicit progress and completion stores owned by the engine
//! - **Engine**: [`Tracker`](engine::Tracker) validates edits and builds reports
//! - **Persistence**: versioned bincode saves and JSON export
//!
//! # Example
//!
//! ```rust,no_run
//! use ascension_core::prelude::*;
//! use ascension_core::config::{load_config, load_game_data};
//! use std::path::Path;
//!
//! let data = load_game_data(Path::new("data/materials.json")).unwrap();
//! let config = load_config(Path::new("data/config.json")).unwrap();
//! let mut tracker = Tracker::new(data, config);
//!
//! tracker.update_progress("Lyney", "mora_ascension", 420_000).unwrap();
//! let report = tracker.item_report("Lyney").unwrap();
//! for section in &report.sections {
//!     println!("{}: {}", section.title, section.report.satisfied);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{ItemReport, SectionReport, Tracker};
    pub use crate::error::TrackerError;
    pub use crate::store::{CompletionStore, ProgressStore};
    pub use ascension_logic::requirements::BucketKind;
}
