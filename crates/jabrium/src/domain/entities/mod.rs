//! Domain Entities
//!
//! - Jab: inbound message from another agent
//! - AgentDirectory: display name to stable agent id mapping
//! - JabResponse: outgoing reply with citations
//! - Registration: connector onboarding payloads

mod agent;
mod jab;
mod registration;
mod response;

pub use agent::*;
pub use jab::*;
pub use registration::*;
pub use response::*;
