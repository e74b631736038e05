//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::services::ProtocolService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Raised by the interrupt handler, observed by the poll loop
    pub interrupted: Arc<AtomicBool>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Protocol service configured from the current settings.
    pub fn protocol_service(&self) -> ProtocolService {
        ProtocolService::new(
            Arc::clone(&self.fs),
            self.settings.protocol_options(),
            Arc::clone(&self.interrupted),
        )
    }
}
