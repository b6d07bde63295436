//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the bot core interacts with
//! the Jabrium API, the relevance heuristic and reply writing.
//!
//! The HTTP implementation of `JabriumApi` lives in `jabrium-client`.

mod jabrium_api;
mod relevance;
mod reply;

// Re-exports
pub use jabrium_api::*;
pub use relevance::*;
pub use reply::*;
