//! AddressingMode - How seen contributions are keyed for citation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::BotError;

/// Store addressing used by the poll loop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AddressingMode {
    /// Latest content per sender, keyed by directory agent id
    #[default]
    PerSender,
    /// Every jab keyed by its own jab id
    PerMessage,
}

impl AddressingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerSender => "per-sender",
            Self::PerMessage => "per-message",
        }
    }

    /// Whether the agent directory is needed to resolve store keys
    pub fn needs_directory(&self) -> bool {
        matches!(self, Self::PerSender)
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressingMode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-sender" | "sender" => Ok(Self::PerSender),
            "per-message" | "message" => Ok(Self::PerMessage),
            other => Err(BotError::Config(format!(
                "unknown addressing mode '{}' (expected per-sender or per-message)",
                other
            ))),
        }
    }
}
