#![forbid(unsafe_code)]

//! Core domain model and business logic for the weekly workout tracker.
//!
//! This crate provides:
//! - Week identifier arithmetic
//! - The plan catalog (days, groups, exercise pairs)
//! - Progress store with pluggable persistence
//! - Completion helpers and cardio session parsing
//! - Markdown and JSON progress reports

pub mod error;
pub mod week;
pub mod types;
pub mod catalog;
pub mod keys;
pub mod config;
pub mod logging;
pub mod storage;
pub mod store;
pub mod completion;
pub mod cardio;
pub mod history;
pub mod report;

// Re-export commonly used types
pub use error::{Error, ImportError, Result};
pub use week::{current_week_id, monday_of, week_id_for, WeekId};
pub use types::*;
pub use catalog::{build_default_catalog, default_catalog, KeyIndex};
pub use keys::{exercise_slots, EntryKey, ExerciseSlot, Slot};
pub use config::Config;
pub use storage::{FileBackend, MemoryBackend, StorageBackend, STORAGE_KEY};
pub use store::{parse_import, ProgressStore, IMPORT_SUCCESS_MESSAGE};
pub use completion::{day_progress, has_second_exercise, is_day_complete};
pub use cardio::{cardio_sessions, parse_session, CardioSession, CardioStyle};
pub use history::{exercise_history, ExerciseHistory, HISTORY_WEEKS};
pub use report::{json_report, markdown_report, JsonReport, ReportBuilder, ReportOptions};
