//! Configuration for the Jabrium bot
//!
//! Values come from flags or the environment (a `.env` file is loaded
//! first), then get resolved into client and poll loop settings.

use anyhow::{bail, Result};
use clap::Args;
use std::time::Duration;

use jabrium::{AddressingMode, PollConfig, RegistrationRequest};
use jabrium_client::{JabriumConfig, LlmConfig, LlmProvider, DEFAULT_BASE_URL};

/// Connection settings shared by every command
#[derive(Debug, Clone, Args)]
pub struct ConnectionArgs {
    /// Jabrium instance URL
    #[arg(long, global = true, env = "JABRIUM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Agent API key (sent as x-agent-key)
    #[arg(long, global = true, env = "JABRIUM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, env = "JABRIUM_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Poll loop settings
#[derive(Debug, Clone, Args)]
pub struct PollArgs {
    /// This bot's agent id
    #[arg(long, env = "JABRIUM_AGENT_ID")]
    pub agent_id: Option<String>,

    /// Seconds between inbox polls
    #[arg(long, env = "POLL_INTERVAL", default_value_t = 30)]
    pub poll_interval: u64,

    /// How seen contributions are keyed: per-sender or per-message
    #[arg(long, env = "JABRIUM_ADDRESSING", default_value = "per-sender")]
    pub addressing: AddressingMode,
}

/// Details for registering a new bot
#[derive(Debug, Clone, Args)]
pub struct RegistrationArgs {
    /// Owner email used when registering
    #[arg(long, env = "JABRIUM_OWNER_EMAIL")]
    pub owner_email: Option<String>,

    /// Agent display name used when registering
    #[arg(long, env = "JABRIUM_AGENT_NAME")]
    pub agent_name: Option<String>,

    /// Cadence preset
    #[arg(long, env = "JABRIUM_CADENCE", default_value = jabrium::domain::entities::DEFAULT_CADENCE)]
    pub cadence: String,
}

/// Optional LLM reply generation; template replies when no key is set
#[derive(Debug, Clone, Args)]
pub struct LlmArgs {
    /// LLM provider: anthropic or openai
    #[arg(long, env = "LLM_PROVIDER", default_value = "anthropic")]
    pub llm_provider: LlmProvider,

    /// LLM provider API key
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    /// Model name (defaults per provider)
    #[arg(long, env = "LLM_MODEL")]
    pub llm_model: Option<String>,
}

/// Settings for the `run` command
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub poll: PollArgs,

    #[command(flatten)]
    pub registration: RegistrationArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    /// Run a single poll cycle and exit
    #[arg(long)]
    pub once: bool,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl ConnectionArgs {
    /// Client configuration; the API key may be absent (registration)
    pub fn client_config(&self) -> JabriumConfig {
        JabriumConfig::new(non_blank(self.api_key.as_deref()).unwrap_or_default())
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Client configuration for endpoints that need the agent key
    pub fn authenticated_config(&self) -> Result<JabriumConfig> {
        let config = self.client_config();
        if !config.has_api_key() {
            bail!("JABRIUM_API_KEY is not set. Export it or pass --api-key.");
        }
        Ok(config)
    }

    pub fn has_api_key(&self) -> bool {
        non_blank(self.api_key.as_deref()).is_some()
    }

    /// Same connection with a freshly issued key
    pub fn with_api_key(&self, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..self.clone()
        }
    }
}

impl PollArgs {
    pub fn poll_config(&self) -> Result<PollConfig> {
        let agent_id = match non_blank(self.agent_id.as_deref()) {
            Some(id) => id.to_string(),
            None => bail!("JABRIUM_AGENT_ID is not set. Export it or pass --agent-id."),
        };
        if self.poll_interval == 0 {
            bail!("POLL_INTERVAL must be at least 1 second");
        }

        Ok(PollConfig::new(agent_id)
            .with_interval(Duration::from_secs(self.poll_interval))
            .with_addressing(self.addressing))
    }

    pub fn has_agent_id(&self) -> bool {
        non_blank(self.agent_id.as_deref()).is_some()
    }

    /// Same settings for a freshly registered agent
    pub fn with_agent_id(&self, agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: Some(agent_id.into()),
            ..self.clone()
        }
    }
}

impl RegistrationArgs {
    /// Registration payload, if both owner email and agent name are set
    pub fn request(&self) -> Option<RegistrationRequest> {
        let owner_email = non_blank(self.owner_email.as_deref())?;
        let agent_name = non_blank(self.agent_name.as_deref())?;
        Some(RegistrationRequest::new(owner_email, agent_name).with_cadence(self.cadence.trim()))
    }
}

impl LlmArgs {
    /// LLM settings when an API key is configured
    pub fn llm_config(&self) -> Option<LlmConfig> {
        let api_key = non_blank(self.llm_api_key.as_deref())?;
        let config = LlmConfig::new(self.llm_provider, api_key);
        Some(match non_blank(self.llm_model.as_deref()) {
            Some(model) => config.with_model(model),
            None => config,
        })
    }
}

impl RunArgs {
    /// Credentials the bot must register for before it can poll
    pub fn missing_credentials(&self, connection: &ConnectionArgs) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !connection.has_api_key() {
            missing.push("JABRIUM_API_KEY");
        }
        if !self.poll.has_agent_id() {
            missing.push("JABRIUM_AGENT_ID");
        }
        missing
    }
}

/// Show only enough of a secret to recognise it
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn connection(api_key: Option<&str>) -> ConnectionArgs {
        ConnectionArgs {
            base_url: "https://jabrium.test/".to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 10,
        }
    }

    fn poll_args(agent_id: Option<&str>) -> PollArgs {
        PollArgs {
            agent_id: agent_id.map(str::to_string),
            poll_interval: 15,
            addressing: AddressingMode::PerMessage,
        }
    }

    fn registration_args(owner_email: Option<&str>, agent_name: Option<&str>) -> RegistrationArgs {
        RegistrationArgs {
            owner_email: owner_email.map(str::to_string),
            agent_name: agent_name.map(str::to_string),
            cadence: "rapid".to_string(),
        }
    }

    fn llm_args(api_key: Option<&str>, model: Option<&str>) -> LlmArgs {
        LlmArgs {
            llm_provider: LlmProvider::OpenAi,
            llm_api_key: api_key.map(str::to_string),
            llm_model: model.map(str::to_string),
        }
    }

    fn run_args(agent_id: Option<&str>) -> RunArgs {
        RunArgs {
            poll: poll_args(agent_id),
            registration: registration_args(None, None),
            llm: llm_args(None, None),
            once: false,
        }
    }

    #[test]
    fn test_client_config_from_args() {
        let config = connection(Some("key-abc")).authenticated_config().unwrap();
        assert_eq!(config.base_url, "https://jabrium.test");
        assert_eq!(config.api_key, "key-abc");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_api_key_is_rejected_for_authenticated_calls() {
        assert!(connection(None).authenticated_config().is_err());
        assert!(!connection(None).client_config().has_api_key());
        assert!(connection(Some("  ")).authenticated_config().is_err());
    }

    #[test]
    fn test_poll_config_from_args() {
        let config = poll_args(Some(" agent-1 ")).poll_config().unwrap();
        assert_eq!(config.agent_id, "agent-1");
        assert_eq!(config.interval, Duration::from_secs(15));
        assert_eq!(config.addressing, AddressingMode::PerMessage);
    }

    #[test]
    fn test_poll_config_requires_agent_and_interval() {
        assert!(poll_args(None).poll_config().is_err());
        assert!(poll_args(Some("   ")).poll_config().is_err());

        let mut args = poll_args(Some("agent-1"));
        args.poll_interval = 0;
        assert!(args.poll_config().is_err());
    }

    #[test]
    fn test_missing_credentials() {
        assert!(run_args(Some("agent-1"))
            .missing_credentials(&connection(Some("key")))
            .is_empty());
        assert_eq!(
            run_args(Some("agent-1")).missing_credentials(&connection(None)),
            vec!["JABRIUM_API_KEY"]
        );
        assert_eq!(
            run_args(None).missing_credentials(&connection(None)),
            vec!["JABRIUM_API_KEY", "JABRIUM_AGENT_ID"]
        );
    }

    #[test]
    fn test_registered_credentials_fill_in_settings() {
        let connection = connection(None).with_api_key("key-new");
        let poll = poll_args(None).with_agent_id("agent-new");

        assert_eq!(connection.authenticated_config().unwrap().api_key, "key-new");
        assert_eq!(poll.poll_config().unwrap().agent_id, "agent-new");
        assert_eq!(poll.addressing, AddressingMode::PerMessage);
    }

    #[test]
    fn test_registration_request_needs_email_and_name() {
        assert!(registration_args(None, Some("Bot")).request().is_none());
        assert!(registration_args(Some("a@b.test"), Some(" ")).request().is_none());

        let request = registration_args(Some(" a@b.test "), Some("Bot"))
            .request()
            .unwrap();
        assert_eq!(request.owner_email, "a@b.test");
        assert_eq!(request.agent_name, "Bot");
        assert_eq!(request.cadence_preset, "rapid");
    }

    #[test]
    fn test_llm_config_only_with_key() {
        assert!(llm_args(None, Some("gpt-x")).llm_config().is_none());
        assert!(llm_args(Some(""), None).llm_config().is_none());

        let config = llm_args(Some("sk-1"), None).llm_config().unwrap();
        assert_eq!(config.provider, LlmProvider::OpenAi);
        assert_eq!(config.model, "gpt-4o-mini");

        let config = llm_args(Some("sk-1"), Some("gpt-x")).llm_config().unwrap();
        assert_eq!(config.model, "gpt-x");
    }

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        run: RunArgs,
    }

    #[test]
    fn test_run_flags_parse() {
        let cli = TestCli::try_parse_from([
            "jabrium-bot",
            "--agent-id",
            "agent-1",
            "--addressing",
            "per-message",
            "--llm-provider",
            "openai",
            "--once",
        ])
        .unwrap();

        assert_eq!(cli.run.poll.agent_id.as_deref(), Some("agent-1"));
        assert_eq!(cli.run.poll.addressing, AddressingMode::PerMessage);
        assert_eq!(cli.run.llm.llm_provider, LlmProvider::OpenAi);
        assert!(cli.run.once);
    }

    #[test]
    fn test_unknown_llm_provider_is_rejected() {
        assert!(TestCli::try_parse_from(["jabrium-bot", "--llm-provider", "mistral"]).is_err());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "****");
        assert_eq!(mask_secret("jab_live_0123456789"), "jab_****");
    }
}
