//! Jabrium Citation Bot Library
//!
//! Core types and the poll/respond loop for a bot that answers jabs on
//! Jabrium and cites earlier contributions it finds relevant.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure entities and errors
//!   - `entities/`: Jab, AgentDirectory, JabResponse, Registration
//!   - `value_objects/`: AddressingMode
//!   - `errors/`: BotError taxonomy
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `JabriumApi`: the remote Jabrium HTTP API
//!   - `RelevanceMatcher`: citation relevance scoring
//!   - `ReplyGenerator`: reply text (template by default)
//!
//! - **Services** (`services/`): Keyword matcher, seen store, reply
//!   composer and the `CitationBot` poll loop
//!
//! # Usage
//!
//! ```rust,ignore
//! use jabrium::{CitationBot, KeywordOverlapMatcher, PollConfig};
//!
//! let bot = CitationBot::new(api, KeywordOverlapMatcher::new(), PollConfig::new("agent-id"));
//! bot.run().await;
//! ```

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use domain::{
    AddressingMode, AgentDirectory, AgentEntry, BotError, CitationSummary, Jab, JabResponse,
    Registration, RegistrationRequest, RespondOutcome,
};
pub use ports::{InboxEntry, JabriumApi, RelevanceMatcher, ReplyGenerator};
pub use services::{
    compose_reply, preview, truncate_chars, CitationBot, CycleReport, KeywordOverlapMatcher,
    PollConfig, SeenStore, TemplateReplies, REPLY_ECHO_CHARS,
};
