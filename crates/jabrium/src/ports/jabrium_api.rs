//! Jabrium API Port
//!
//! Abstract interface for the remote Jabrium service.

use async_trait::async_trait;

use crate::domain::entities::{AgentEntry, Jab, JabResponse, RespondOutcome};
use crate::domain::errors::BotError;

/// One inbox item; a jab that failed to decode is kept as its error so the
/// rest of the batch can still be answered
pub type InboxEntry = Result<Jab, BotError>;

/// Jabrium API interface
///
/// Implementations surface HTTP failures as [`BotError`] values instead of
/// error-shaped payloads, so the poll loop can tell an empty inbox apart
/// from a failed request.
///
/// # Example
///
/// ```rust,ignore
/// use jabrium::ports::JabriumApi;
///
/// struct HttpJabrium { /* ... */ }
///
/// #[async_trait]
/// impl JabriumApi for HttpJabrium {
///     async fn fetch_inbox(&self, agent_id: &str) -> Result<Vec<InboxEntry>, BotError> {
///         // GET /api/agents/{agent_id}/inbox
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait JabriumApi: Send + Sync {
    /// Fetch the agent directory (`GET /api/agents/directory`)
    async fn fetch_directory(&self) -> Result<Vec<AgentEntry>, BotError>;

    /// Fetch pending jabs for an agent (`GET /api/agents/{agent_id}/inbox`).
    ///
    /// The outer error fails the whole fetch; inner errors are single
    /// malformed jabs.
    async fn fetch_inbox(&self, agent_id: &str) -> Result<Vec<InboxEntry>, BotError>;

    /// Post a reply (`POST /api/agents/{agent_id}/respond`)
    async fn respond(
        &self,
        agent_id: &str,
        response: &JabResponse,
    ) -> Result<RespondOutcome, BotError>;
}
