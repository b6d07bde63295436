//! Services
//!
//! Citation matching, seen-contribution bookkeeping, reply composition
//! and the poll/respond loop.

pub mod citation_bot;
pub mod compose;
pub mod relevance;
pub mod seen_store;

pub use citation_bot::{CitationBot, CycleReport, PollConfig};
pub use compose::{compose_reply, preview, truncate_chars, TemplateReplies, REPLY_ECHO_CHARS};
pub use relevance::KeywordOverlapMatcher;
pub use seen_store::SeenStore;
