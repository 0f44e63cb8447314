//! Error types for the workout_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for workout_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Malformed week identifier
    #[error("Invalid week identifier '{0}' (expected YYYY-Www)")]
    InvalidWeekId(String),

    /// Import was rejected
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Reasons an import payload is rejected.
///
/// Every variant is reported to the user as "Invalid data"; the detail only
/// goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid data: not valid JSON ({0})")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid data: missing `weeks` object")]
    MissingWeeks,

    #[error("Invalid data: week identifier '{0}'")]
    WeekId(String),

    #[error("Invalid data: week '{week}': {reason}")]
    MalformedWeek { week: String, reason: String },
}

impl ImportError {
    /// Message shown to the user for any rejected import
    pub fn user_message(&self) -> &'static str {
        "Invalid data"
    }
}
