//! Path context for I/O failures

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach what was being done, and to which path, to an `io::Error`.
pub trait IoResultExt<T> {
    /// Wrap the error as `OperationFailed`; it renders as `<action> <path>: <io error>`.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{} {}", action, path.display()),
            source: Box::new(source),
        })
    }
}
