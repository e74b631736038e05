//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod services;
pub mod workspace;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use workspace::{find_workspace_root, require_workspace_root, GIT_MARKER};
