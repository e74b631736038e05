//! Ctrl+C handling
//!
//! The handler only raises a flag; the poll loop checks it between sleeps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::infrastructure::InfraResult;

/// Install a process-wide handler that sets `flag` on Ctrl+C.
///
/// Can only be called once per process.
pub fn install_interrupt_handler(flag: Arc<AtomicBool>) -> InfraResult<()> {
    ctrlc::set_handler(move || {
        debug!("interrupt received");
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(())
}
