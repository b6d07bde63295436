//! Seen Store
//!
//! Process-lifetime record of the latest content per identifier. There is
//! no eviction, so memory grows with the number of distinct identifiers.

use std::collections::BTreeMap;

/// Identifier to latest content, snapshotted for the matcher
#[derive(Debug, Clone, Default)]
pub struct SeenStore {
    entries: BTreeMap<String, String>,
}

impl SeenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the content for an identifier
    pub fn record(&mut self, identifier: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(identifier.into(), content.into());
    }

    /// Current snapshot, ordered by identifier
    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
