//! Application services

pub mod protocol;

pub use protocol::{
    CleanupWarning, ProtocolOptions, ProtocolService, WriteReport,
    DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT,
};
