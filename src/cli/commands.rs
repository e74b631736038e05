//! Command dispatch and outcome rendering
//!
//! One invocation: locate the workspace, validate the command, write the
//! command file, wait for the result file and render it. Every step either
//! advances or ends the invocation; nothing is retried.

use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use tracing::{debug, instrument};

use crate::application::services::ProtocolService;
use crate::application::{require_workspace_root, ApplicationError};
use crate::cli::args::Cli;
use crate::cli::output::Output;
use crate::cli::usage::{remediation_checklist, usage_text};
use crate::cli::{CliError, CliResult};
use crate::domain::{BridgeVariant, CommandKind, CommandRequest, ProtocolPaths, ResultEnvelope};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// What the user was shown, and how the process should exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Usage text on request (or no command given)
    Help,
    /// Unknown command or too few arguments
    UsageError,
    /// No `.git` found above the start directory
    NotARepository,
    /// Writing the command or reading the result failed
    BridgeFailure,
    /// The extension reported success
    Success,
    /// The extension answered with `success: false`
    RemoteFailure,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Help | Outcome::Success => exitcode::OK,
            Outcome::UsageError
            | Outcome::NotARepository
            | Outcome::BridgeFailure
            | Outcome::RemoteFailure => exitcode::FAILURE,
        }
    }
}

/// Whether the invocation only asks for help.
pub fn wants_usage(cli: &Cli) -> bool {
    cli.help_requested() || cli.command.is_none()
}

pub fn print_usage<O: Write, E: Write>(output: &mut Output<O, E>, variant: BridgeVariant) {
    output.info(&usage_text(variant));
}

/// Run one parsed invocation against `container`.
///
/// Failures the user can act on are rendered and returned as an [`Outcome`];
/// `Err` is reserved for interrupts and unexpected failures.
#[instrument(skip_all, fields(variant = variant.program_name(), command = ?cli.command))]
pub fn execute_command<O: Write, E: Write>(
    cli: &Cli,
    variant: BridgeVariant,
    container: &ServiceContainer,
    output: &mut Output<O, E>,
) -> CliResult<Outcome> {
    let Some(name) = cli.command.as_deref().filter(|_| !cli.help_requested()) else {
        print_usage(output, variant);
        return Ok(Outcome::Help);
    };

    let start = start_dir(cli)?;
    let root = match require_workspace_root(container.fs.as_ref(), &start) {
        Ok(root) => root,
        Err(ApplicationError::NotARepository { .. }) => {
            output.error("Not in a git repository");
            output.hint("Please run this command from within a git repository");
            return Ok(Outcome::NotARepository);
        }
        Err(e) => return Err(e.into()),
    };
    output.info(&format!("Workspace: {}", root.display()));

    let request = match CommandKind::parse(name, variant)
        .and_then(|kind| kind.request(variant, &cli.args, &Local::now()))
    {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "rejected invocation");
            output.error(&e);
            print_usage(output, variant);
            return Ok(Outcome::UsageError);
        }
    };

    let service = container.protocol_service();
    let paths = variant.paths(&root);
    match exchange(&service, &paths, &request, output) {
        Ok(result) => {
            if service.options().debug_echo {
                echo_result(&service, &paths, &result, output);
            }
            Ok(render_result(&result, output))
        }
        Err(ApplicationError::Interrupted) => Err(ApplicationError::Interrupted.into()),
        Err(e @ ApplicationError::MalformedResult { .. }) => {
            output.error(&e);
            output.hint("VS Code answered, but the result does not have the expected shape");
            output.hint("Check that the extension version matches this tool");
            Ok(Outcome::BridgeFailure)
        }
        Err(e) => {
            render_bridge_failure(&e, variant, output);
            Ok(Outcome::BridgeFailure)
        }
    }
}

fn start_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("determine current directory", e))),
    }
}

/// Write the command, report cleanup problems, then block on the result.
fn exchange<O: Write, E: Write>(
    service: &ProtocolService,
    paths: &ProtocolPaths,
    request: &CommandRequest,
    output: &mut Output<O, E>,
) -> Result<ResultEnvelope, ApplicationError> {
    let report = service.write_command(paths, request.protocol_name(), &request.args)?;
    for warning in &report.warnings {
        output.warning(&format!(
            "Failed to clean up existing files: {}: {}",
            warning.path.display(),
            warning.reason
        ));
    }
    output.flush();

    service.wait_for_result(&paths.result_file)
}

fn echo_result<O: Write, E: Write>(
    service: &ProtocolService,
    paths: &ProtocolPaths,
    result: &ResultEnvelope,
    output: &mut Output<O, E>,
) {
    match service.write_debug_echo(&paths.debug_file, result) {
        Ok(()) => output.note(&format!(
            "[Debug: Result written to {}]",
            paths.debug_file.display()
        )),
        Err(e) => output.warning(&e),
    }
}

fn render_bridge_failure<O: Write, E: Write>(
    error: &ApplicationError,
    variant: BridgeVariant,
    output: &mut Output<O, E>,
) {
    output.error(error);
    output.err_line("");
    output.err_line("Make sure:");
    for item in remediation_checklist(variant) {
        output.hint(&format!("- {}", item));
    }
}

/// Print the extension's logs and verdict.
pub fn render_result<O: Write, E: Write>(
    result: &ResultEnvelope,
    output: &mut Output<O, E>,
) -> Outcome {
    match result.log_lines() {
        Some(lines) => {
            output.info("\n--- Extension Logs ---");
            for line in lines {
                output.info(line);
            }
            output.info("--- End Logs ---\n");
        }
        None => output.info("\n[No logs available from extension]"),
    }

    if result.success {
        output.success(result.message_or_default());
        Outcome::Success
    } else {
        output.error(result.error_or_default());
        Outcome::RemoteFailure
    }
}
