//! File-based request/response protocol
//!
//! One request is in flight per workspace: the command file is written, the
//! editor extension answers by writing the result file, which is consumed
//! exactly once and deleted. There are no request identifiers, so concurrent
//! invocations against the same workspace race on the same two files.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde_json::error::Category;
use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{CommandEnvelope, ProtocolPaths, ResultEnvelope};
use crate::infrastructure::traits::FileSystem;

/// Default time to wait for the result file.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default sleep between checks for the result file.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timing and side-effect knobs for one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
    /// Persist every parsed result to the debug file
    pub debug_echo: bool,
}

impl Default for ProtocolOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            debug_echo: true,
        }
    }
}

/// A stale protocol file that could not be removed before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupWarning {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of writing the command file.
#[derive(Debug, Clone)]
pub struct WriteReport {
    pub envelope: CommandEnvelope,
    pub warnings: Vec<CleanupWarning>,
}

/// Writer and poller for the command/result file pair.
pub struct ProtocolService {
    fs: Arc<dyn FileSystem>,
    options: ProtocolOptions,
    interrupted: Arc<AtomicBool>,
}

impl ProtocolService {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        options: ProtocolOptions,
        interrupted: Arc<AtomicBool>,
    ) -> Self {
        Self {
            fs,
            options,
            interrupted,
        }
    }

    pub fn options(&self) -> &ProtocolOptions {
        &self.options
    }

    /// Remove stale protocol files, then write a fresh command envelope.
    ///
    /// Cleanup failures are returned as warnings; only the write itself is fatal.
    #[instrument(skip(self, paths, args))]
    pub fn write_command(
        &self,
        paths: &ProtocolPaths,
        command: &str,
        args: &[String],
    ) -> ApplicationResult<WriteReport> {
        let warnings = self.remove_stale(paths);

        let envelope = CommandEnvelope::new(command, args.to_vec(), Utc::now().timestamp_millis());
        let json = envelope
            .to_json()
            .map_err(|e| ApplicationError::WriteFailed {
                path: paths.command_file.clone(),
                source: Box::new(e),
            })?;

        self.fs
            .write(&paths.command_file, &json)
            .map_err(|e| ApplicationError::WriteFailed {
                path: paths.command_file.clone(),
                source: Box::new(e),
            })?;
        debug!(path = %paths.command_file.display(), "command written");

        Ok(WriteReport { envelope, warnings })
    }

    fn remove_stale(&self, paths: &ProtocolPaths) -> Vec<CleanupWarning> {
        [&paths.command_file, &paths.result_file]
            .into_iter()
            .filter_map(|path| match self.fs.remove_file_if_exists(path) {
                Ok(removed) => {
                    if removed {
                        debug!(path = %path.display(), "removed stale file");
                    }
                    None
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cleanup failed");
                    Some(CleanupWarning {
                        path: path.clone(),
                        reason: e.to_string(),
                    })
                }
            })
            .collect()
    }

    /// Poll for the result file until it appears, the timeout elapses or
    /// the interrupt flag is raised.
    ///
    /// The file is checked before the first sleep, so at least one attempt is
    /// made even with a zero timeout. A result that exists but cannot be
    /// read or parsed fails immediately: text that is not JSON is a read
    /// error, JSON of the wrong shape is a malformed result.
    #[instrument(skip(self))]
    pub fn wait_for_result(&self, result_path: &Path) -> ApplicationResult<ResultEnvelope> {
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            if self.interrupted.load(Ordering::SeqCst) {
                return Err(ApplicationError::Interrupted);
            }

            attempts += 1;
            if self.fs.exists(result_path) {
                debug!(attempts, "result file found");
                return self.consume_result(result_path);
            }

            let elapsed = started.elapsed();
            if elapsed >= self.options.timeout {
                debug!(attempts, "gave up waiting for result");
                return Err(ApplicationError::Timeout { waited: elapsed });
            }

            let remaining = self.options.timeout - elapsed;
            thread::sleep(self.options.poll_interval.min(remaining));
        }
    }

    fn consume_result(&self, result_path: &Path) -> ApplicationResult<ResultEnvelope> {
        let read_error = |reason: String| ApplicationError::ResultRead {
            path: result_path.to_path_buf(),
            reason,
        };

        let text = self
            .fs
            .read_to_string(result_path)
            .map_err(|e| read_error(e.to_string()))?;
        let result = ResultEnvelope::from_json(&text).map_err(|e| match e.classify() {
            Category::Data => ApplicationError::MalformedResult {
                path: result_path.to_path_buf(),
                reason: e.to_string(),
            },
            _ => read_error(e.to_string()),
        })?;

        if let Err(e) = self.fs.remove_file(result_path) {
            debug!(error = %e, "could not remove result file");
        }
        Ok(result)
    }

    /// Overwrite the debug file with a pretty-printed copy of `result`.
    pub fn write_debug_echo(&self, debug_path: &Path, result: &ResultEnvelope) -> ApplicationResult<()> {
        let json = result.to_json().map_err(|e| ApplicationError::OperationFailed {
            context: "serialize debug echo".into(),
            source: Box::new(e),
        })?;
        self.fs
            .write(debug_path, &json)
            .with_path_context("write debug echo", debug_path)
    }
}
