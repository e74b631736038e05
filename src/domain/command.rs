//! CLI subcommands and their mapping onto protocol commands

use chrono::{DateTime, TimeZone};

use crate::domain::error::DomainError;
use crate::domain::variant::BridgeVariant;

/// Format of the timestamp prepended to a stamped `ping`.
pub const PING_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Compare,
    CompareHead,
    Clear,
    Ping,
    SetTitle,
}

impl CommandKind {
    /// Resolve a subcommand name for the given variant.
    ///
    /// `set-title` only exists for variants that support it.
    pub fn parse(name: &str, variant: BridgeVariant) -> Result<Self, DomainError> {
        let kind = match name {
            "compare" => CommandKind::Compare,
            "compare-head" => CommandKind::CompareHead,
            "clear" => CommandKind::Clear,
            "ping" => CommandKind::Ping,
            "set-title" if variant.supports_set_title() => CommandKind::SetTitle,
            other => return Err(DomainError::UnknownCommand(other.to_string())),
        };
        Ok(kind)
    }

    pub fn cli_name(self) -> &'static str {
        match self {
            CommandKind::Compare => "compare",
            CommandKind::CompareHead => "compare-head",
            CommandKind::Clear => "clear",
            CommandKind::Ping => "ping",
            CommandKind::SetTitle => "set-title",
        }
    }

    /// Name sent in the command envelope.
    pub fn protocol_name(self) -> &'static str {
        match self {
            CommandKind::Compare => "compareReferences",
            CommandKind::CompareHead => "compareHead",
            CommandKind::Clear => "clearComparisons",
            CommandKind::Ping => "ping",
            CommandKind::SetTitle => "setTerminalTitle",
        }
    }

    pub fn min_args(self) -> usize {
        match self {
            CommandKind::Compare => 2,
            CommandKind::CompareHead | CommandKind::SetTitle => 1,
            CommandKind::Clear | CommandKind::Ping => 0,
        }
    }

    fn requirement(self) -> &'static str {
        match self {
            CommandKind::Compare => "2 arguments: <ref1> <ref2>",
            CommandKind::CompareHead => "1 argument: <ref>",
            CommandKind::SetTitle => "1 argument: <title>",
            CommandKind::Clear | CommandKind::Ping => "no arguments",
        }
    }

    /// Validate `args` and shape the protocol request.
    ///
    /// `now` is only consulted for a stamped `ping`.
    pub fn request<Tz>(
        self,
        variant: BridgeVariant,
        args: &[String],
        now: &DateTime<Tz>,
    ) -> Result<CommandRequest, DomainError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if args.len() < self.min_args() {
            return Err(DomainError::MissingArguments {
                command: self.cli_name(),
                requirement: self.requirement(),
            });
        }

        let args = match self {
            CommandKind::Clear => Vec::new(),
            CommandKind::Ping if variant.stamps_ping() => {
                let mut stamped = Vec::with_capacity(args.len() + 1);
                stamped.push(now.format(PING_TIMESTAMP_FORMAT).to_string());
                stamped.extend(args.iter().cloned());
                stamped
            }
            CommandKind::Ping => Vec::new(),
            CommandKind::Compare | CommandKind::CompareHead | CommandKind::SetTitle => {
                args.to_vec()
            }
        };

        Ok(CommandRequest {
            kind: self,
            args,
        })
    }
}

/// A validated request, ready to be written as an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub kind: CommandKind,
    pub args: Vec<String>,
}

impl CommandRequest {
    pub fn protocol_name(&self) -> &'static str {
        self.kind.protocol_name()
    }
}
