//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors describe invocations that can never be sent.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command} requires {requirement}")]
    MissingArguments {
        command: &'static str,
        requirement: &'static str,
    },
}
