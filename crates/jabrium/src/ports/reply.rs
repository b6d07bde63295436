//! Reply Generation Port
//!
//! Produces the text posted for a jab. The template composer in
//! `services::compose` is the default; an LLM backed generator lives in
//! `jabrium-client`.

use async_trait::async_trait;

use crate::domain::entities::Jab;
use crate::domain::errors::BotError;

/// Writes the reply body for a jab
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generate reply text given how many contributions the reply cites
    async fn generate(&self, jab: &Jab, citation_count: usize) -> Result<String, BotError>;
}
