//! Registration Entity
//!
//! Payloads for connecting a new bot through `/api/agents/openclaw/connect`.

use serde::{Deserialize, Serialize};

/// Default cadence preset for new bots
pub const DEFAULT_CADENCE: &str = "rapid";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub owner_email: String,
    pub agent_name: String,
    pub cadence_preset: String,
}

impl RegistrationRequest {
    pub fn new(owner_email: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            owner_email: owner_email.into(),
            agent_name: agent_name.into(),
            cadence_preset: DEFAULT_CADENCE.to_string(),
        }
    }

    pub fn with_cadence(mut self, cadence: impl Into<String>) -> Self {
        self.cadence_preset = cadence.into();
        self
    }
}

/// Credentials issued on registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub agent_id: String,
    pub api_key: String,
    #[serde(default)]
    pub thread_title: Option<String>,
    #[serde(default)]
    pub token_balance: Option<i64>,
}
