//! Wire messages exchanged with the editor extension

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request written to the command file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    /// Protocol command name, e.g. `compareReferences`
    pub command: String,
    /// Positional arguments, order preserved
    pub args: Vec<String>,
    /// Milliseconds since the Unix epoch at write time
    pub timestamp: i64,
}

impl CommandEnvelope {
    pub fn new(command: impl Into<String>, args: Vec<String>, timestamp: i64) -> Self {
        Self {
            command: command.into(),
            args,
            timestamp,
        }
    }

    /// Serialize as pretty-printed JSON (2-space indentation).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Response read from the result file.
///
/// Every field besides `success` is optional on the wire. Unknown keys are
/// kept in `extra` so the debug echo reproduces what the extension sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultEnvelope {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Log lines sent by the extension; `None` when absent or empty.
    pub fn log_lines(&self) -> Option<&[String]> {
        self.logs.as_deref().filter(|logs| !logs.is_empty())
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    pub fn error_or_default(&self) -> &str {
        self.error.as_deref().unwrap_or("Unknown error")
    }
}
