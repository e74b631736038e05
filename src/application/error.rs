//! Application-level errors: workspace, protocol and configuration failures

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures after an invocation has been validated.
///
/// Invalid invocations never get this far; they stay a `DomainError`.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Not in a git repository (searched upward from {})", .start.display())]
    NotARepository { start: PathBuf },

    #[error("failed to write command file {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Timeout waiting for VS Code to process command ({}ms)", .waited.as_millis())]
    Timeout { waited: Duration },

    #[error("Failed to read result from {}: {reason}", .path.display())]
    ResultRead { path: PathBuf, reason: String },

    /// The extension answered, but not with a result envelope.
    #[error("Malformed result in {}: {reason}", .path.display())]
    MalformedResult { path: PathBuf, reason: String },

    #[error("Interrupted")]
    Interrupted,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
