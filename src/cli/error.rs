//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(e) if e.is_interrupt() => crate::exitcode::INTERRUPTED,
            CliError::Infra(_) => crate::exitcode::FAILURE,
        }
    }

    pub fn is_interrupt(&self) -> bool {
        matches!(self, CliError::Infra(e) if e.is_interrupt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_interrupt_then_exit_code_is_130() {
        let err = CliError::from(ApplicationError::Interrupted);
        assert_eq!(err.exit_code(), 130);
        assert!(err.is_interrupt());
    }

    #[test]
    fn given_config_error_then_exit_code_is_1() {
        let err = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        assert_eq!(err.exit_code(), 1);
    }
}
