//! Core error types for formwright.
//!
//! Problems with a form definition itself (missing action, duplicate ids,
//! malformed toggles) are never reported through [`FormwrightError`]; they are
//! collected as error and warning messages on the form. This type covers the
//! failures that stop a pipeline from running at all: unreadable definition
//! files, unparsable input, and cache storage I/O.

use thiserror::Error;

/// The primary error type for formwright.
#[derive(Error, Debug)]
pub enum FormwrightError {
    // ── Configuration ────────────────────────────────────────────────

    /// A definition file or setting could not be read or understood.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred while parsing or producing structured data.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Cache ────────────────────────────────────────────────────────

    /// The cache artifact store rejected an operation.
    #[error("Cache error: {0}")]
    Cache(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormwrightError {
    /// Returns the process exit code associated with this error.
    ///
    /// - `Configuration`, `Serialization` -> 2
    /// - `Cache`, `Io` -> 3
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Serialization(_) => 2,
            Self::Cache(_) | Self::Io(_) => 3,
        }
    }
}

/// A convenience type alias for `Result<T, FormwrightError>`.
pub type FormwrightResult<T> = Result<T, FormwrightError>;
