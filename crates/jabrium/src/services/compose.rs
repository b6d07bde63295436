//! Reply composition and text truncation

use async_trait::async_trait;

use crate::domain::{BotError, Jab};
use crate::ports::ReplyGenerator;

/// Characters of the original jab echoed back in a reply
pub const REPLY_ECHO_CHARS: usize = 200;

/// Characters shown in log previews
pub const PREVIEW_CHARS: usize = 80;

/// Keep at most `max` characters, cutting on a char boundary with no ellipsis
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the reply text for a jab given how many contributions it cites
pub fn compose_reply(content: &str, citation_count: usize) -> String {
    let echo = truncate_chars(content, REPLY_ECHO_CHARS);
    if citation_count > 0 {
        format!(
            "Building on {} previous contribution(s): {}",
            citation_count, echo
        )
    } else {
        format!("Regarding: {}", echo)
    }
}

/// Default reply generator: echoes the jab through [`compose_reply`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateReplies;

#[async_trait]
impl ReplyGenerator for TemplateReplies {
    async fn generate(&self, jab: &Jab, citation_count: usize) -> Result<String, BotError> {
        Ok(compose_reply(&jab.content, citation_count))
    }
}

/// Short single-line preview for logs
pub fn preview(text: &str) -> String {
    let cut = truncate_chars(text, PREVIEW_CHARS);
    if cut.len() < text.len() {
        format!("{}...", cut)
    } else {
        cut.to_string()
    }
}
