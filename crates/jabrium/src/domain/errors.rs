//! Bot Errors
//!
//! Error taxonomy for talking to Jabrium. Every variant is caught at the
//! poll cycle boundary; none of them terminates the bot.

use thiserror::Error;

/// Errors surfaced by the Jabrium API port and the poll loop
#[derive(Debug, Error)]
pub enum BotError {
    /// Network or connection failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP status with the response body
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// JSON parse failure or missing expected fields
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BotError {
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Stable classification used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Api { .. } => "api",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Config(_) => "config",
        }
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
