//! Tests for ProtocolService: command writing, result polling, debug echo

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use rstest::rstest;
use serde_json::Value;
use tempfile::TempDir;

use ide_bridge::application::services::{ProtocolOptions, ProtocolService};
use ide_bridge::application::ApplicationError;
use ide_bridge::domain::{BridgeVariant, ProtocolPaths, ResultEnvelope};
use ide_bridge::infrastructure::traits::{FileSystem, RealFileSystem};
use ide_bridge::util::testing;

fn options(timeout_ms: u64, poll_interval_ms: u64) -> ProtocolOptions {
    ProtocolOptions {
        timeout: Duration::from_millis(timeout_ms),
        poll_interval: Duration::from_millis(poll_interval_ms),
        debug_echo: true,
    }
}

fn service(options: ProtocolOptions) -> ProtocolService {
    ProtocolService::new(
        Arc::new(RealFileSystem),
        options,
        Arc::new(AtomicBool::new(false)),
    )
}

fn workspace() -> (TempDir, ProtocolPaths) {
    let temp = TempDir::new().unwrap();
    let paths = BridgeVariant::ClaudeHelper.paths(temp.path());
    (temp, paths)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Filesystem that refuses to delete anything.
struct UndeletableFileSystem;

impl FileSystem for UndeletableFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, _path: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        path.canonicalize()
    }
}

// ============================================================
// Command writer
// ============================================================

#[test]
fn given_command_when_written_then_file_holds_envelope() {
    // Arrange
    testing::init_test_setup();
    let (_temp, paths) = workspace();
    let service = service(ProtocolOptions::default());
    let args = strings(&["origin/main", "HEAD", "extra"]);

    // Act
    let before = Utc::now().timestamp_millis();
    let report = service
        .write_command(&paths, "compareReferences", &args)
        .unwrap();

    // Assert
    let raw: Value = serde_json::from_str(&fs::read_to_string(&paths.command_file).unwrap()).unwrap();
    let object = raw.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(raw["command"], "compareReferences");
    assert_eq!(raw["args"], serde_json::json!(["origin/main", "HEAD", "extra"]));
    let timestamp = raw["timestamp"].as_i64().unwrap();
    assert!((timestamp - before).abs() < 1000);
    assert_eq!(report.envelope.timestamp, timestamp);
    assert!(report.warnings.is_empty());
}

#[test]
fn given_command_when_written_then_json_is_two_space_indented() {
    let (_temp, paths) = workspace();
    let service = service(ProtocolOptions::default());

    service.write_command(&paths, "clearComparisons", &[]).unwrap();

    let text = fs::read_to_string(&paths.command_file).unwrap();
    assert!(text.starts_with("{\n  \"command\": \"clearComparisons\",\n  \"args\": [],"));
}

#[test]
fn given_no_stale_files_when_writing_twice_then_both_succeed() {
    let (_temp, paths) = workspace();
    let service = service(ProtocolOptions::default());

    let first = service.write_command(&paths, "ping", &[]).unwrap();
    let second = service.write_command(&paths, "ping", &[]).unwrap();

    assert!(first.warnings.is_empty());
    assert!(second.warnings.is_empty());
    assert!(paths.command_file.exists());
}

#[test]
fn given_stale_result_when_writing_then_result_removed() {
    // Arrange
    let (_temp, paths) = workspace();
    fs::write(&paths.result_file, r#"{"success": true, "message": "old"}"#).unwrap();
    fs::write(&paths.command_file, "garbage").unwrap();
    let service = service(ProtocolOptions::default());

    // Act
    service.write_command(&paths, "compareHead", &strings(&["main"])).unwrap();

    // Assert
    assert!(!paths.result_file.exists());
    let raw: Value = serde_json::from_str(&fs::read_to_string(&paths.command_file).unwrap()).unwrap();
    assert_eq!(raw["command"], "compareHead");
}

#[test]
fn given_undeletable_stale_files_when_writing_then_warns_and_continues() {
    // Arrange
    let (_temp, paths) = workspace();
    fs::write(&paths.command_file, "stale").unwrap();
    let service = ProtocolService::new(
        Arc::new(UndeletableFileSystem),
        ProtocolOptions::default(),
        Arc::new(AtomicBool::new(false)),
    );

    // Act
    let report = service.write_command(&paths, "ping", &[]).unwrap();

    // Assert
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(report.warnings[0].path, paths.command_file);
    let raw: Value = serde_json::from_str(&fs::read_to_string(&paths.command_file).unwrap()).unwrap();
    assert_eq!(raw["command"], "ping");
}

#[test]
fn given_missing_workspace_dir_when_writing_then_write_failed() {
    let temp = TempDir::new().unwrap();
    let paths = BridgeVariant::GitLensCli.paths(&temp.path().join("gone"));
    let service = service(ProtocolOptions::default());

    let err = service.write_command(&paths, "ping", &[]).unwrap_err();

    assert!(matches!(err, ApplicationError::WriteFailed { .. }));
}

// ============================================================
// Result poller
// ============================================================

#[test]
fn given_result_appears_later_when_polling_then_returns_it_and_deletes_file() {
    // Arrange
    testing::init_test_setup();
    let (_temp, paths) = workspace();
    let service = service(options(30_000, 100));
    let result_file = paths.result_file.clone();
    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        fs::write(
            &result_file,
            r#"{"success": true, "message": "Comparing HEAD with main"}"#,
        )
        .unwrap();
    });

    // Act
    let result = service.wait_for_result(&paths.result_file).unwrap();
    writer.join().unwrap();

    // Assert
    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some("Comparing HEAD with main"));
    assert!(!paths.result_file.exists());
}

#[test]
fn given_no_result_when_polling_then_times_out() {
    // Arrange
    let (_temp, paths) = workspace();
    let service = service(options(200, 100));

    // Act
    let started = Instant::now();
    let err = service.wait_for_result(&paths.result_file).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::Timeout { .. }));
    assert!(started.elapsed() >= Duration::from_millis(200));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn given_zero_timeout_and_existing_result_when_polling_then_still_found() {
    let (_temp, paths) = workspace();
    fs::write(&paths.result_file, r#"{"success": false, "error": "nope"}"#).unwrap();
    let service = service(options(0, 100));

    let result = service.wait_for_result(&paths.result_file).unwrap();

    assert!(!result.success);
    assert_eq!(result.error_or_default(), "nope");
}

#[test]
fn given_invalid_json_when_polling_then_fails_without_retry() {
    // Arrange
    let (_temp, paths) = workspace();
    fs::write(&paths.result_file, "{not json").unwrap();
    let service = service(options(30_000, 100));

    // Act
    let started = Instant::now();
    let err = service.wait_for_result(&paths.result_file).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::ResultRead { .. }));
    assert!(err.to_string().starts_with("Failed to read result"));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[rstest]
#[case::success_as_string(r#"{"success": "yes"}"#)]
#[case::numeric_message(r#"{"success": true, "message": 5}"#)]
#[case::non_string_log_line(r#"{"success": true, "logs": ["ok", 3]}"#)]
#[case::top_level_array(r#"["success"]"#)]
fn given_json_of_wrong_shape_when_polling_then_malformed_result(#[case] body: &str) {
    // Arrange
    let (_temp, paths) = workspace();
    fs::write(&paths.result_file, body).unwrap();
    let service = service(options(30_000, 100));

    // Act
    let err = service.wait_for_result(&paths.result_file).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::MalformedResult { .. }), "{err:?}");
    assert!(err.to_string().starts_with("Malformed result in"));
}

#[test]
fn given_interrupt_flag_when_polling_then_interrupted() {
    // Arrange
    let (_temp, paths) = workspace();
    let flag = Arc::new(AtomicBool::new(false));
    let service = ProtocolService::new(Arc::new(RealFileSystem), options(30_000, 20), Arc::clone(&flag));
    let raiser = thread::spawn(move || {
        thread::sleep(Duration::from_millis(60));
        flag.store(true, Ordering::SeqCst);
    });

    // Act
    let err = service.wait_for_result(&paths.result_file).unwrap_err();
    raiser.join().unwrap();

    // Assert
    assert!(matches!(err, ApplicationError::Interrupted));
}

#[test]
fn given_undeletable_result_when_polling_then_result_still_returned() {
    let (_temp, paths) = workspace();
    fs::write(&paths.result_file, r#"{"success": true}"#).unwrap();
    let service = ProtocolService::new(
        Arc::new(UndeletableFileSystem),
        options(1_000, 10),
        Arc::new(AtomicBool::new(false)),
    );

    let result = service.wait_for_result(&paths.result_file).unwrap();

    assert!(result.success);
    assert!(paths.result_file.exists());
}

// ============================================================
// Debug echo
// ============================================================

#[test]
fn given_result_when_echoed_then_debug_file_overwritten() {
    // Arrange
    let (_temp, paths) = workspace();
    fs::write(&paths.debug_file, "previous run").unwrap();
    let service = service(ProtocolOptions::default());
    let result = ResultEnvelope::from_json(r#"{"success": true, "message": "done", "logs": ["a"]}"#)
        .unwrap();

    // Act
    service.write_debug_echo(&paths.debug_file, &result).unwrap();

    // Assert
    let echoed: Value = serde_json::from_str(&fs::read_to_string(&paths.debug_file).unwrap()).unwrap();
    assert_eq!(echoed["success"], true);
    assert_eq!(echoed["message"], "done");
    assert_eq!(echoed["logs"], serde_json::json!(["a"]));
}
