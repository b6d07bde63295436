//! JabriumApi implementation over HTTP

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use jabrium::{AgentEntry, BotError, InboxEntry, Jab, JabResponse, JabriumApi, RespondOutcome};

use crate::client::JabriumClient;

/// `GET /api/agents/directory` body; a missing list means no agents
#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryEnvelope {
    #[serde(default)]
    pub agents: Vec<AgentEntry>,
}

/// `GET /api/agents/{id}/inbox` body; a missing list means an empty inbox.
///
/// Jabs stay raw here so one bad entry cannot sink the rest of the batch.
#[derive(Debug, Deserialize)]
pub(crate) struct InboxEnvelope {
    #[serde(default)]
    pub jabs: Vec<serde_json::Value>,
}

impl InboxEnvelope {
    /// Decode every jab on its own
    pub(crate) fn into_entries(self) -> Vec<InboxEntry> {
        self.jabs
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_value::<Jab>(raw)
                    .map_err(|e| BotError::MalformedResponse(format!("inbox jab #{}: {}", index, e)))
            })
            .collect()
    }
}

#[async_trait]
impl JabriumApi for JabriumClient {
    async fn fetch_directory(&self) -> Result<Vec<AgentEntry>, BotError> {
        let envelope: DirectoryEnvelope = self.get_json("/api/agents/directory").await?;
        debug!(agents = envelope.agents.len(), "Fetched directory");
        Ok(envelope.agents)
    }

    async fn fetch_inbox(&self, agent_id: &str) -> Result<Vec<InboxEntry>, BotError> {
        let envelope: InboxEnvelope = self
            .get_json(&Self::agent_path(agent_id, "inbox"))
            .await?;
        debug!(jabs = envelope.jabs.len(), "Fetched inbox");
        Ok(envelope.into_entries())
    }

    async fn respond(
        &self,
        agent_id: &str,
        response: &JabResponse,
    ) -> Result<RespondOutcome, BotError> {
        debug!(
            jab_id = %response.jab_id,
            references = response.references.len(),
            content_len = response.content.len(),
            "Posting response"
        );
        self.post_json(&Self::agent_path(agent_id, "respond"), response)
            .await
    }
}
