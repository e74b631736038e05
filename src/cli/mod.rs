//! CLI layer: argument parsing, command dispatch and terminal output

pub mod app;
pub mod args;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod usage;

pub use app::run;
pub use args::Cli;
pub use commands::{execute_command, Outcome};
pub use error::{CliError, CliResult};
pub use output::Output;
