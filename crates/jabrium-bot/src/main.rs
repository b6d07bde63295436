//! Jabrium Citation Bot
//!
//! Polls a Jabrium inbox, answers every jab and cites earlier
//! contributions that share enough keywords with it.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Input;
use std::sync::Arc;

use jabrium::{
    CitationBot, JabriumApi, KeywordOverlapMatcher, PollConfig, Registration,
    RegistrationRequest, ReplyGenerator,
};
use jabrium_client::{JabriumClient, LlmReplyGenerator};

use config::{mask_secret, ConnectionArgs, PollArgs, RegistrationArgs, RunArgs};

#[derive(Parser)]
#[command(name = "jabrium-bot")]
#[command(about = "Jabrium citation bot - answers jabs and cites relevant contributions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the inbox and respond (default)
    Run(RunArgs),

    /// Register a new bot and print its credentials
    Register(RegistrationArgs),

    /// List agents in the directory
    Directory,

    /// Show the effective configuration
    Config(PollArgs),
}

/// Resolves run settings from env and defaults alone
#[derive(Parser)]
struct RunOnly {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(args)) => cmd_run(&cli.connection, args).await,
        None => {
            // no subcommand: run with settings from the environment
            let args = RunOnly::try_parse_from(["jabrium-bot"])?.run;
            cmd_run(&cli.connection, args).await
        }
        Some(Commands::Register(args)) => cmd_register(&cli.connection, args).await,
        Some(Commands::Directory) => cmd_directory(&cli.connection).await,
        Some(Commands::Config(args)) => cmd_config(&cli.connection, &args),
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_run(connection: &ConnectionArgs, args: RunArgs) -> Result<()> {
    let missing = args.missing_credentials(connection);
    let (connection, poll_args) = if missing.is_empty() {
        (connection.clone(), args.poll.clone())
    } else {
        let Some(request) = args.registration.request() else {
            bail!(
                "{} not set. Export them, or set JABRIUM_OWNER_EMAIL and JABRIUM_AGENT_NAME to register a new bot.",
                missing.join(" and ")
            );
        };
        tracing::info!(missing = %missing.join(","), "No credentials, registering a new bot");
        let registration = register_agent(connection, &request).await?;
        (
            connection.with_api_key(registration.api_key),
            args.poll.with_agent_id(registration.agent_id),
        )
    };

    let poll = poll_args.poll_config()?;
    let client_config = connection.authenticated_config()?;

    tracing::info!(base_url = %client_config.base_url, "Connecting to Jabrium");
    let client = JabriumClient::new(client_config).context("Failed to create Jabrium client")?;

    match args.llm.llm_config() {
        Some(llm) => {
            tracing::info!(provider = %llm.provider, model = %llm.model, "Replies generated by LLM");
            let replies = LlmReplyGenerator::new(llm).context("Failed to create LLM client")?;
            drive(client, poll, replies, args.once).await
        }
        None => {
            tracing::info!("Replies use the built-in template");
            drive(client, poll, jabrium::TemplateReplies, args.once).await
        }
    }
}

async fn drive<R: ReplyGenerator>(
    client: JabriumClient,
    poll: PollConfig,
    replies: R,
    once: bool,
) -> Result<()> {
    let mut bot = CitationBot::new(Arc::new(client), KeywordOverlapMatcher::new(), poll)
        .with_replies(replies);

    if once {
        bot.run_once().await.context("Poll cycle failed")?;
        return Ok(());
    }

    bot.run().await;
    Ok(())
}

/// Register and print the issued credentials
async fn register_agent(
    connection: &ConnectionArgs,
    request: &RegistrationRequest,
) -> Result<Registration> {
    let client = JabriumClient::new(connection.client_config())
        .context("Failed to create Jabrium client")?;

    println!("Registering \"{}\" on Jabrium...", request.agent_name.cyan());

    let registration = client
        .register(request)
        .await
        .context("Registration failed")?;

    println!("{} Registered successfully", "✓".green());
    println!("  Agent ID: {}", registration.agent_id.cyan());
    if let Some(title) = &registration.thread_title {
        println!("  Thread:   {}", title);
    }
    if let Some(balance) = registration.token_balance {
        println!("  Tokens:   {}", balance);
    }

    println!("\n{}", "Save these env vars for next time:".yellow());
    println!("  JABRIUM_AGENT_ID={}", registration.agent_id);
    println!("  JABRIUM_API_KEY={}", registration.api_key);

    Ok(registration)
}

async fn cmd_register(connection: &ConnectionArgs, args: RegistrationArgs) -> Result<()> {
    let owner_email = match args.owner_email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Owner email")
            .interact_text()
            .context("Failed to read owner email")?,
    };
    let agent_name = match args.agent_name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Agent name")
            .interact_text()
            .context("Failed to read agent name")?,
    };

    if owner_email.trim().is_empty() || agent_name.trim().is_empty() {
        bail!("Owner email and agent name are both required to register");
    }

    let request = RegistrationRequest::new(owner_email.trim(), agent_name.trim())
        .with_cadence(args.cadence.trim());
    register_agent(connection, &request).await?;

    Ok(())
}

async fn cmd_directory(connection: &ConnectionArgs) -> Result<()> {
    let client = JabriumClient::new(connection.authenticated_config()?)
        .context("Failed to create Jabrium client")?;

    let mut agents = client
        .fetch_directory()
        .await
        .context("Failed to fetch agent directory")?;

    if agents.is_empty() {
        println!("No agents found.");
        return Ok(());
    }

    agents.sort_by(|a, b| a.agent_name.cmp(&b.agent_name));

    println!("{}", "Agents:".bold());
    for agent in &agents {
        println!("  {} {}", agent.agent_name.cyan(), agent.agent_id.dimmed());
    }
    println!("\n{} agent(s)", agents.len().to_string().green());

    Ok(())
}

fn cmd_config(connection: &ConnectionArgs, args: &PollArgs) -> Result<()> {
    println!("{}", "Configuration:".bold());
    println!("  Base URL: {}", connection.base_url);
    println!(
        "  API Key: {}",
        match connection.api_key.as_deref() {
            Some(key) if !key.is_empty() => mask_secret(key).green(),
            _ => "Not set".red(),
        }
    );
    println!(
        "  Agent ID: {}",
        args.agent_id.as_deref().unwrap_or("Not set").cyan()
    );
    println!("  Poll Interval: {}s", args.poll_interval);
    println!("  Addressing: {}", args.addressing);
    println!("  Timeout: {}s", connection.timeout_secs);

    Ok(())
}
