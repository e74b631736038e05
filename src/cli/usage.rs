//! Help text for each bridge variant

use crate::domain::BridgeVariant;

/// Help text printed for `-h`, a missing command, or a usage error.
pub fn usage_text(variant: BridgeVariant) -> String {
    match variant {
        BridgeVariant::ClaudeHelper => CLAUDE_HELPER_USAGE.to_string(),
        BridgeVariant::GitLensCli => GITLENS_CLI_USAGE.to_string(),
    }
}

/// Likely causes shown when the editor never answered.
pub fn remediation_checklist(variant: BridgeVariant) -> [String; 3] {
    let gitlens = match variant {
        BridgeVariant::ClaudeHelper => "GitLens extension is installed (for compare commands)",
        BridgeVariant::GitLensCli => "GitLens extension is installed",
    };
    [
        "VS Code is open with your workspace".to_string(),
        format!("{} extension is installed and activated", variant.extension_name()),
        gitlens.to_string(),
    ]
}

const CLAUDE_HELPER_USAGE: &str = r#"
Claude Helper - CLI tools for Claude Code

Usage:
  claude-helper compare <ref1> <ref2>   Compare two git references
  claude-helper compare-head <ref>      Compare HEAD with a reference
  claude-helper clear                   Clear all comparisons
  claude-helper ping [message]          Show notification in VS Code with timestamp
  claude-helper set-title <title>       Set the current terminal title
  ch compare <ref1> <ref2>              (short alias)
  ch compare-head <ref>                 (short alias)
  ch clear                              (short alias)
  ch ping [message]                     (short alias)
  ch set-title <title>                  (short alias)

Options:
  -C, --project-dir <DIR>   Start the repository search here (default: cwd)
  -v, --verbose             Diagnostic logging to stderr (repeat for more)
      --timeout <SECS>      Seconds to wait for VS Code (default: 30)
      --no-debug-echo       Do not write .claude-helper-debug.json
  -h, --help                Show this help
  -V, --version             Show version

Examples:
  claude-helper compare main feature-branch
  claude-helper compare origin/main HEAD
  claude-helper compare-head origin/main
  claude-helper clear
  claude-helper ping
  claude-helper ping "Build completed successfully"
  claude-helper set-title "Building Project"

  # Using short alias
  ch compare main feature-branch
  ch clear
  ch ping
  ch ping "Tests finished"
  ch set-title "Running Tests"

Requirements:
  - Must be run from within a git repository
  - VS Code must be open with the workspace
  - GitLens extension must be installed (for compare commands)
  - Claude Helper extension must be installed in VS Code
"#;

const GITLENS_CLI_USAGE: &str = r#"
GitLens CLI Bridge - Run GitLens compare commands from the CLI

Usage:
  gitlens-cli compare <ref1> <ref2>     Compare two references
  gitlens-cli compare-head <ref>        Compare HEAD with a reference
  gitlens-cli clear                     Clear all comparisons
  gitlens-cli ping                      Play a sound/notification in VS Code
  glcli compare <ref1> <ref2>           (short alias)
  glcli compare-head <ref>              (short alias)
  glcli clear                           (short alias)
  glcli ping                            (short alias)

Options:
  -C, --project-dir <DIR>   Start the repository search here (default: cwd)
  -v, --verbose             Diagnostic logging to stderr (repeat for more)
      --timeout <SECS>      Seconds to wait for VS Code (default: 30)
      --no-debug-echo       Do not write .gitlens-cli-debug.json
  -h, --help                Show this help
  -V, --version             Show version

Examples:
  gitlens-cli compare main feature-branch
  gitlens-cli compare origin/main HEAD
  gitlens-cli compare-head origin/main
  gitlens-cli clear
  gitlens-cli ping

  # Using short alias
  glcli compare main feature-branch
  glcli clear
  glcli ping

Requirements:
  - Must be run from within a git repository
  - VS Code must be open with the workspace
  - GitLens extension must be installed
  - GitLens CLI Bridge extension must be installed
"#;
