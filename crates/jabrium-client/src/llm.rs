//! LLM-backed reply generation
//!
//! Optional replacement for the template replies. Sends the jab to the
//! Anthropic Messages API or the OpenAI Chat Completions API and posts
//! whatever text comes back.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use jabrium::{BotError, Jab, ReplyGenerator};

use crate::client::execute;

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const MAX_TOKENS: u32 = 1024;

/// Supported LLM providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LlmProvider {
    #[default]
    Anthropic,
    OpenAi,
}

impl LlmProvider {
    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "claude-sonnet-4-20250514",
            LlmProvider::OpenAi => "gpt-4o-mini",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(LlmProvider::Anthropic),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(BotError::Config(format!(
                "Unsupported LLM provider '{}' (expected anthropic or openai)",
                other
            ))),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Anthropic => write!(f, "anthropic"),
            LlmProvider::OpenAi => write!(f, "openai"),
        }
    }
}

/// LLM connection settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    /// Settings for a provider with its default model
    pub fn new(provider: LlmProvider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            model: provider.default_model().to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Override the model; blank values keep the default
    pub fn with_model(mut self, model: impl AsRef<str>) -> Self {
        let model = model.as_ref().trim();
        if !model.is_empty() {
            self.model = model.to_string();
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================
// Wire types
// ============================================

#[derive(Debug, Serialize, PartialEq)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}

/// System prompt naming the sender when it is known
fn system_prompt(sender: Option<&str>) -> String {
    let base = "You are an AI agent participating in Jabrium, a discussion platform.";
    match sender.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => format!(
            "{} {} sent you this message. Respond thoughtfully and concisely.",
            base, name
        ),
        None => format!("{} Respond thoughtfully and concisely.", base),
    }
}

fn anthropic_request(model: &str, jab: &Jab) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_string(),
        max_tokens: MAX_TOKENS,
        system: system_prompt(jab.sender_name.as_deref()),
        messages: vec![ChatMessage {
            role: "user",
            content: jab.content.clone(),
        }],
    }
}

fn openai_request(model: &str, jab: &Jab) -> OpenAiRequest {
    OpenAiRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt(jab.sender_name.as_deref()),
            },
            ChatMessage {
                role: "user",
                content: jab.content.clone(),
            },
        ],
    }
}

/// Keep only non-blank reply text
fn non_empty(text: Option<String>, provider: LlmProvider) -> Result<String, BotError> {
    text.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
        BotError::MalformedResponse(format!("{} reply contained no text", provider))
    })
}

fn anthropic_text(response: AnthropicResponse) -> Result<String, BotError> {
    let text = response.content.into_iter().find_map(|block| block.text);
    non_empty(text, LlmProvider::Anthropic)
}

fn openai_text(response: OpenAiResponse) -> Result<String, BotError> {
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content);
    non_empty(text, LlmProvider::OpenAi)
}

/// Reply generator backed by a hosted LLM
pub struct LlmReplyGenerator {
    http: Client,
    config: LlmConfig,
}

impl LlmReplyGenerator {
    pub fn new(config: LlmConfig) -> Result<Self, BotError> {
        if config.api_key.trim().is_empty() {
            return Err(BotError::Config("LLM API key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BotError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

#[async_trait]
impl ReplyGenerator for LlmReplyGenerator {
    async fn generate(&self, jab: &Jab, citation_count: usize) -> Result<String, BotError> {
        debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            jab_id = %jab.id,
            citations = citation_count,
            "Generating reply"
        );

        match self.config.provider {
            LlmProvider::Anthropic => {
                let request = self
                    .http
                    .post(ANTHROPIC_URL)
                    .header("x-api-key", &self.config.api_key)
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .json(&anthropic_request(&self.config.model, jab));
                let response: AnthropicResponse = execute(ANTHROPIC_URL, request).await?;
                anthropic_text(response)
            }
            LlmProvider::OpenAi => {
                let request = self
                    .http
                    .post(OPENAI_URL)
                    .bearer_auth(&self.config.api_key)
                    .json(&openai_request(&self.config.model, jab));
                let response: OpenAiResponse = execute(OPENAI_URL, request).await?;
                openai_text(response)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::decode;

    #[test]
    fn test_provider_parsing() {
        assert_eq!("anthropic".parse::<LlmProvider>().unwrap(), LlmProvider::Anthropic);
        assert_eq!(" OpenAI ".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAi);

        let err = "mistral".parse::<LlmProvider>().unwrap_err();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("mistral"));
    }

    #[test]
    fn test_config_model_defaults() {
        let config = LlmConfig::new(LlmProvider::OpenAi, "sk-test");
        assert_eq!(config.model, "gpt-4o-mini");

        let config = LlmConfig::new(LlmProvider::Anthropic, "sk-test").with_model("  ");
        assert_eq!(config.model, "claude-sonnet-4-20250514");

        let config = config.with_model("claude-haiku");
        assert_eq!(config.model, "claude-haiku");
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let err = LlmReplyGenerator::new(LlmConfig::new(LlmProvider::Anthropic, " ")).err();
        assert_eq!(err.map(|e| e.kind()), Some("config"));
    }

    #[test]
    fn test_anthropic_request_body() {
        let jab = Jab::new("j-1", "What about tides?").from_sender("Ada");
        let body = serde_json::to_value(anthropic_request("claude-x", &jab)).unwrap();

        assert_eq!(body["model"], "claude-x");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "What about tides?");
        assert!(body["system"].as_str().unwrap().contains("Ada sent you this message"));
    }

    #[test]
    fn test_openai_request_body() {
        let jab = Jab::new("j-1", "What about tides?");
        let body = serde_json::to_value(openai_request("gpt-x", &jab)).unwrap();

        assert_eq!(body["model"], "gpt-x");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "What about tides?");
        assert!(!body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("sent you this message"));
    }

    #[test]
    fn test_anthropic_text_extraction() {
        let response: AnthropicResponse = decode(
            "/v1/messages",
            r#"{"content":[{"type":"text","text":"Tides follow the moon."}]}"#,
        )
        .unwrap();
        assert_eq!(anthropic_text(response).unwrap(), "Tides follow the moon.");

        let empty: AnthropicResponse = decode("/v1/messages", r#"{"content":[]}"#).unwrap();
        assert_eq!(anthropic_text(empty).unwrap_err().kind(), "malformed_response");
    }

    #[test]
    fn test_openai_text_extraction() {
        let response: OpenAiResponse = decode(
            "/v1/chat/completions",
            r#"{"choices":[{"message":{"role":"assistant","content":"Moon pull."}}]}"#,
        )
        .unwrap();
        assert_eq!(openai_text(response).unwrap(), "Moon pull.");

        let blank: OpenAiResponse = decode(
            "/v1/chat/completions",
            r#"{"choices":[{"message":{"role":"assistant","content":"  "}}]}"#,
        )
        .unwrap();
        assert_eq!(openai_text(blank).unwrap_err().kind(), "malformed_response");
    }
}
