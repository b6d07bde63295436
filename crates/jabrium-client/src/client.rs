//! Jabrium API client wrapper

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use jabrium::{BotError, Registration, RegistrationRequest};

use crate::config::JabriumConfig;

const AGENT_KEY_HEADER: &str = "x-agent-key";

/// Jabrium HTTP client
pub struct JabriumClient {
    http: Client,
    config: JabriumConfig,
}

impl JabriumClient {
    /// Create a new Jabrium client
    pub fn new(config: JabriumConfig) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| BotError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &JabriumConfig {
        &self.config
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Path under `/api/agents/{agent_id}` with the id percent-encoded
    pub(crate) fn agent_path(agent_id: &str, suffix: &str) -> String {
        format!("/api/agents/{}/{}", urlencoding::encode(agent_id), suffix)
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Content-Type", "application/json");
        if self.config.has_api_key() {
            request.header(AGENT_KEY_HEADER, &self.config.api_key)
        } else {
            request
        }
    }

    /// GET a JSON document
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BotError> {
        debug!(path = %path, "GET");
        let request = self.with_headers(self.http.get(self.url(path)));
        execute(path, request).await
    }

    /// POST a JSON body and decode the JSON reply
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BotError> {
        debug!(path = %path, "POST");
        let request = self.with_headers(self.http.post(self.url(path))).json(body);
        execute(path, request).await
    }

    /// Register a new connector bot; no agent key is required
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Registration, BotError> {
        debug!(agent_name = %request.agent_name, "Registering agent");
        self.post_json("/api/agents/openclaw/connect", request).await
    }
}

/// Send a request and decode its JSON reply.
///
/// Send failures are `Transport`, non-2xx statuses are `Api` and undecodable
/// bodies are `MalformedResponse`. Callers log the outcome with context.
pub(crate) async fn execute<T: DeserializeOwned>(
    path: &str,
    request: RequestBuilder,
) -> Result<T, BotError> {
    let response = request
        .send()
        .await
        .map_err(|e| BotError::Transport(format!("{}: {}", path, e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| BotError::Transport(format!("{}: failed to read body: {}", path, e)))?;

    if !status.is_success() {
        debug!(path = %path, status = status.as_u16(), "Non-success status");
        return Err(BotError::api(status.as_u16(), body));
    }

    decode(path, &body)
}

/// Decode a 2xx body, classifying failures as malformed responses
pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, BotError> {
    serde_json::from_str(body)
        .map_err(|e| BotError::MalformedResponse(format!("{}: {}", path, e)))
}
