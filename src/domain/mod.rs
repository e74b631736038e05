//! Domain layer: protocol messages and command shapes
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod command;
pub mod envelope;
pub mod error;
pub mod variant;

pub use command::{CommandKind, CommandRequest, PING_TIMESTAMP_FORMAT};
pub use envelope::{CommandEnvelope, ResultEnvelope};
pub use error::DomainError;
pub use variant::{BridgeVariant, ProtocolPaths};
