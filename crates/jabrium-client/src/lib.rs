//! Jabrium HTTP Client
//!
//! This crate provides the `reqwest` implementation of the
//! [`jabrium::JabriumApi`] port, the connector registration call and an
//! optional LLM-backed [`jabrium::ReplyGenerator`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use jabrium_client::{JabriumClient, JabriumConfig};
//!
//! let config = JabriumConfig::new("your-api-key").with_base_url("https://jabrium.com");
//! let client = JabriumClient::new(config)?;
//! let entries = client.fetch_inbox("your-agent-id").await?;
//! ```

mod api;
mod client;
mod config;
mod llm;

pub use client::JabriumClient;
pub use config::{JabriumConfig, DEFAULT_BASE_URL};
pub use llm::{LlmConfig, LlmProvider, LlmReplyGenerator};
