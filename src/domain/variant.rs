//! Bridge variants and the file layout they use inside a workspace

use std::path::{Path, PathBuf};

/// The two flavours of the bridge.
///
/// Both speak the same protocol; they differ in file names, the set of
/// commands they accept and how `ping` is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeVariant {
    /// `claude-helper` / `ch`: adds `set-title`, stamps `ping` with local time
    ClaudeHelper,
    /// `gitlens-cli` / `glcli`: comparisons only, bare `ping`
    GitLensCli,
}

impl BridgeVariant {
    pub const ALL: [BridgeVariant; 2] = [BridgeVariant::ClaudeHelper, BridgeVariant::GitLensCli];

    /// Name of the installed binary.
    pub fn program_name(self) -> &'static str {
        match self {
            BridgeVariant::ClaudeHelper => "claude-helper",
            BridgeVariant::GitLensCli => "gitlens-cli",
        }
    }

    /// Short alias, usually installed as a symlink.
    pub fn alias(self) -> &'static str {
        match self {
            BridgeVariant::ClaudeHelper => "ch",
            BridgeVariant::GitLensCli => "glcli",
        }
    }

    /// Base name of the command file; result and debug files derive from it.
    pub fn file_stem(self) -> &'static str {
        match self {
            BridgeVariant::ClaudeHelper => ".claude-helper",
            BridgeVariant::GitLensCli => ".gitlens-cli",
        }
    }

    /// Display name of the companion editor extension.
    pub fn extension_name(self) -> &'static str {
        match self {
            BridgeVariant::ClaudeHelper => "Claude Helper",
            BridgeVariant::GitLensCli => "GitLens CLI Bridge",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            BridgeVariant::ClaudeHelper => "Claude Helper - CLI tools for Claude Code",
            BridgeVariant::GitLensCli => {
                "GitLens CLI Bridge - Run GitLens compare commands from the CLI"
            }
        }
    }

    pub fn supports_set_title(self) -> bool {
        matches!(self, BridgeVariant::ClaudeHelper)
    }

    /// Whether `ping` carries a local timestamp and the user's message.
    pub fn stamps_ping(self) -> bool {
        matches!(self, BridgeVariant::ClaudeHelper)
    }

    /// Pick a variant from the name the process was started as (`argv[0]`).
    ///
    /// Accepts full paths and a `.exe` suffix; matches program names and aliases.
    pub fn from_program_name(name: &str) -> Option<Self> {
        let stem = Path::new(name).file_stem()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|v| v.program_name() == stem || v.alias() == stem)
    }

    pub fn paths(self, workspace_root: &Path) -> ProtocolPaths {
        ProtocolPaths::new(workspace_root, self.file_stem())
    }
}

/// Absolute locations of the protocol files for one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolPaths {
    pub command_file: PathBuf,
    pub result_file: PathBuf,
    pub debug_file: PathBuf,
}

impl ProtocolPaths {
    /// `<root>/<stem>`, `<root>/<stem>-result`, `<root>/<stem>-debug.json`
    pub fn new(workspace_root: &Path, stem: &str) -> Self {
        Self {
            command_file: workspace_root.join(stem),
            result_file: workspace_root.join(format!("{stem}-result")),
            debug_file: workspace_root.join(format!("{stem}-debug.json")),
        }
    }
}
