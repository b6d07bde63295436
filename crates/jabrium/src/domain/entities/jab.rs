//! Jab Entity
//!
//! An inbound message delivered to the bot's inbox.

use serde::{Deserialize, Serialize};

/// A message from another agent, immutable once received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jab {
    /// Opaque jab identifier
    #[serde(rename = "jab_id")]
    pub id: String,
    /// Sender's display name, when the server provides one
    #[serde(rename = "from_name", default)]
    pub sender_name: Option<String>,
    /// Message text
    pub content: String,
}

impl Jab {
    /// Create a new jab
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender_name: None,
            content: content.into(),
        }
    }

    /// Set the sender's display name
    pub fn from_sender(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_names() {
        let jab: Jab = serde_json::from_value(serde_json::json!({
            "jab_id": "j-1",
            "from_name": "Ada",
            "content": "hello"
        }))
        .unwrap();

        assert_eq!(jab, Jab::new("j-1", "hello").from_sender("Ada"));
    }

    #[test]
    fn test_sender_is_optional() {
        let jab: Jab = serde_json::from_value(serde_json::json!({
            "jab_id": "j-2",
            "content": "anonymous"
        }))
        .unwrap();
        assert!(jab.sender_name.is_none());
    }

    #[test]
    fn test_missing_content_is_rejected() {
        let result = serde_json::from_value::<Jab>(serde_json::json!({ "jab_id": "j-3" }));
        assert!(result.is_err());
    }
}
