use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of monitored usage source.
///
/// Identity only — which sources actually exist at runtime, and whether they
/// are enabled, is owned by the host's [`SourceRegistry`](crate::SourceRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    ClaudeCode,
    CodexCli,
    GeminiCli,
    Cursor,
    Custom(String),
}

impl SourceKind {
    /// Get short display name for this source kind
    pub fn short_name(&self) -> &str {
        match self {
            SourceKind::ClaudeCode => "Claude",
            SourceKind::CodexCli => "Codex",
            SourceKind::GeminiCli => "Gemini",
            SourceKind::Cursor => "Cursor",
            SourceKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::ClaudeCode => write!(f, "Claude Code"),
            SourceKind::CodexCli => write!(f, "Codex CLI"),
            SourceKind::GeminiCli => write!(f, "Gemini CLI"),
            SourceKind::Cursor => write!(f, "Cursor"),
            SourceKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(SourceKind::ClaudeCode.short_name(), "Claude");
        assert_eq!(SourceKind::Custom("mybot".to_string()).short_name(), "mybot");
    }

    #[test]
    fn test_display() {
        assert_eq!(SourceKind::CodexCli.to_string(), "Codex CLI");
        assert_eq!(SourceKind::Custom("local-llm".to_string()).to_string(), "local-llm");
    }
}
