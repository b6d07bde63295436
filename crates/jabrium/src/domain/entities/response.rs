//! Response Entity
//!
//! The reply posted for a jab and the server's accounting of it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Body of `POST /api/agents/{agent_id}/respond`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JabResponse {
    /// Jab being answered
    pub jab_id: String,
    pub content: String,
    /// Cited identifiers; omitted from the body when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl JabResponse {
    pub fn new(jab_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            jab_id: jab_id.into(),
            content: content.into(),
            references: Vec::new(),
        }
    }

    /// Attach the citation set
    pub fn with_references(mut self, references: &BTreeSet<String>) -> Self {
        self.references = references.iter().cloned().collect();
        self
    }
}

/// Citation bookkeeping returned by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationSummary {
    #[serde(default)]
    pub citations_processed: u64,
}

/// Server reply to a posted response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondOutcome {
    #[serde(default)]
    pub tokens_earned: u64,
    #[serde(default)]
    pub citations: CitationSummary,
}
