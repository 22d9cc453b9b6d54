//! Unified error types for the mealbox workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum MealboxError {
    /// An I/O operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A workbook file does not exist.
    #[error("cannot find '{}'", path.display())]
    WorkbookNotFound {
        /// Expected location of the workbook.
        path: PathBuf,
    },

    /// A workbook exists but could not be parsed.
    #[error("error reading '{}': {message}", path.display())]
    Workbook {
        /// Workbook that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A named worksheet is absent from a workbook.
    #[error("worksheet '{sheet}' not found in '{}'", path.display())]
    SheetNotFound {
        /// Requested sheet name.
        sheet: String,
        /// Workbook that was searched.
        path: PathBuf,
    },

    /// A required header is absent from a worksheet.
    #[error("column '{column}' missing in '{sheet}' of '{}'", path.display())]
    MissingColumn {
        /// Missing header.
        column: String,
        /// Sheet that was searched.
        sheet: String,
        /// Workbook containing the sheet.
        path: PathBuf,
    },

    /// A requested month is outside 1..=12.
    #[error("Invalid month number: {month}")]
    InvalidMonth {
        /// Rejected value.
        month: i64,
    },

    /// A request body could not be understood.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A background task failed before producing a result.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl MealboxError {
    /// Whether the request itself could not be understood.
    ///
    /// A well-formed request for a month outside 1..=12 is not a client
    /// error; it fails during planning like any other server-side error.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MealboxError>;
