//! Agent Directory
//!
//! Maps agent display names to the stable ids used as citation targets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of `GET /api/agents/directory`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEntry {
    pub agent_name: String,
    pub agent_id: String,
}

impl AgentEntry {
    pub fn new(agent_name: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            agent_id: agent_id.into(),
        }
    }
}

/// Name to id lookup built from the directory endpoint
#[derive(Debug, Clone, Default)]
pub struct AgentDirectory {
    by_name: HashMap<String, String>,
}

impl AgentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory; later entries win on duplicate names
    pub fn from_entries(entries: impl IntoIterator<Item = AgentEntry>) -> Self {
        let by_name = entries
            .into_iter()
            .map(|e| (e.agent_name, e.agent_id))
            .collect();
        Self { by_name }
    }

    /// Resolve a display name to its agent id
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
