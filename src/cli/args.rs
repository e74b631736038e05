//! CLI argument definitions using clap
//!
//! The subcommand is a free positional rather than a clap subcommand: which
//! commands exist depends on the variant, and unknown commands must produce
//! the variant's own usage text and exit code 1.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Trigger git comparisons in a running VS Code through files in the repository root
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Show help
    #[arg(short, long)]
    pub help: bool,

    /// Enable verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Seconds to wait for the editor to answer
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not write the debug echo file
    #[arg(long)]
    pub no_debug_echo: bool,

    /// Command to execute
    pub command: Option<String>,

    /// Command arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// `-h`/`--help` anywhere on the line, including after the command.
    pub fn help_requested(&self) -> bool {
        self.help || self.args.iter().any(|arg| arg == "-h" || arg == "--help")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_command_and_refs_when_parsing_then_positionals_split() {
        let cli = Cli::try_parse_from(["ch", "compare", "main", "feature"]).unwrap();

        assert_eq!(cli.command.as_deref(), Some("compare"));
        assert_eq!(cli.args, vec!["main", "feature"]);
    }

    #[test]
    fn given_hyphenated_message_when_parsing_then_kept_as_argument() {
        let cli = Cli::try_parse_from(["ch", "ping", "build", "-v", "--done"]).unwrap();

        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.args, vec!["build", "-v", "--done"]);
    }

    #[test]
    fn given_global_flags_before_command_when_parsing_then_applied() {
        let cli =
            Cli::try_parse_from(["ch", "-vv", "-C", "/tmp", "--no-debug-echo", "clear"]).unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp")));
        assert!(cli.no_debug_echo);
        assert_eq!(cli.command.as_deref(), Some("clear"));
    }

    #[test]
    fn given_help_after_command_when_parsing_then_help_requested() {
        let cli = Cli::try_parse_from(["ch", "compare", "main", "feature", "--help"]).unwrap();

        assert!(!cli.help);
        assert!(cli.help_requested());
    }

    #[test]
    fn given_short_help_after_ping_when_parsing_then_help_requested() {
        let cli = Cli::try_parse_from(["ch", "ping", "-h"]).unwrap();

        assert!(cli.help_requested());
    }

    #[test]
    fn given_no_arguments_when_parsing_then_no_command() {
        let cli = Cli::try_parse_from(["ch"]).unwrap();

        assert!(cli.command.is_none());
        assert!(!cli.help);
    }
}
