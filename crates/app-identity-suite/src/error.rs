//! Error types for suite generation and execution.

use thiserror::Error;

/// Errors the suite tooling can surface, layered on top of the core's
/// [`app_identity::AppIdentityError`].
#[derive(Debug, Error)]
pub enum SuiteError {
    /// A core AppIdentity error occurred while building or running a test.
    #[error(transparent)]
    Core(#[from] app_identity::AppIdentityError),
    /// Failure reading or writing a suite document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Failure decoding a suite document as JSON.
    #[error("invalid suite JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A suite document was structurally invalid (e.g. empty `tests`).
    #[error("invalid suite: {0}")]
    InvalidSuite(String),
    /// No suite source was supplied to the runner.
    #[error("no suites provided")]
    NoSuites,
}

/// Result alias for suite operations.
pub type Result<T> = std::result::Result<T, SuiteError>;
