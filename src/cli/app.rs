//! Process entry point shared by both binaries

use std::ffi::OsString;
use std::io::Write;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches};
use tracing::debug;

use crate::cli::args::Cli;
use crate::cli::commands::{execute_command, print_usage, wants_usage, Outcome};
use crate::cli::logging::setup_logging;
use crate::cli::output::Output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::BridgeVariant;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::signal::install_interrupt_handler;

/// Run the bridge with the process arguments and return the exit code.
///
/// The variant follows the program name when started through an alias
/// (`ch`, `glcli`), otherwise `default_variant` is used.
pub fn run(default_variant: BridgeVariant) -> i32 {
    let args: Vec<OsString> = std::env::args_os().collect();
    let variant = args
        .first()
        .and_then(|arg0| arg0.to_str())
        .and_then(BridgeVariant::from_program_name)
        .unwrap_or(default_variant);

    let mut output = Output::stdio();
    let code = match run_with(variant, args, &mut output) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            report_fatal(&e, &mut output);
            e.exit_code()
        }
    };
    output.flush();
    code
}

/// Parse `args`, load settings and dispatch.
pub fn run_with<I, T, O, E>(
    variant: BridgeVariant,
    args: I,
    output: &mut Output<O, E>,
) -> CliResult<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    O: Write,
    E: Write,
{
    let command = Cli::command()
        .name(variant.program_name())
        .about(variant.tagline());
    let cli = match command
        .try_get_matches_from(args)
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            output.info(e.to_string().trim_end());
            return Ok(Outcome::Help);
        }
        Err(e) => {
            output.err_line(e.to_string().trim_end());
            print_usage(output, variant);
            return Ok(Outcome::UsageError);
        }
    };

    if wants_usage(&cli) {
        print_usage(output, variant);
        return Ok(Outcome::Help);
    }

    setup_logging(cli.verbose);

    let settings = apply_cli_overrides(Settings::load()?, &cli);
    debug!(?settings, "settings loaded");
    let container = ServiceContainer::new(settings);
    install_interrupt_handler(Arc::clone(&container.interrupted))?;

    execute_command(&cli, variant, &container, output)
}

/// Flags win over config files and environment.
pub fn apply_cli_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(secs) = cli.timeout {
        settings.timeout_ms = secs.saturating_mul(1000);
    }
    if cli.no_debug_echo {
        settings.debug_echo = false;
    }
    settings
}

fn report_fatal<O: Write, E: Write>(error: &CliError, output: &mut Output<O, E>) {
    if error.is_interrupt() {
        output.err_line("");
        output.err_line("✗ Interrupted");
    } else {
        output.fatal(error);
    }
}
