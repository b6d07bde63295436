//! Citation Bot - Poll/respond loop
//!
//! Fetches the inbox, cites relevant earlier contributions, posts a reply
//! for each jab and remembers what it has seen. Runs forever at a fixed
//! interval; a failed cycle is logged and retried on the next tick.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::{AddressingMode, AgentDirectory, BotError, Jab, JabResponse, RespondOutcome};
use crate::ports::{JabriumApi, RelevanceMatcher, ReplyGenerator};
use crate::services::compose::{compose_reply, preview, TemplateReplies};
use crate::services::relevance::KeywordOverlapMatcher;
use crate::services::seen_store::SeenStore;

/// Default seconds between polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Poll loop configuration
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// The bot's own agent id; inbox owner and self-citation exclusion
    pub agent_id: String,
    /// Fixed sleep between cycles
    pub interval: Duration,
    /// How seen contributions are keyed
    pub addressing: AddressingMode,
}

impl PollConfig {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            addressing: AddressingMode::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_addressing(mut self, addressing: AddressingMode) -> Self {
        self.addressing = addressing;
        self
    }
}

/// Summary of one poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    /// Jabs returned by the inbox
    pub received: usize,
    /// Jabs answered successfully
    pub responded: usize,
    /// Jabs whose reply could not be posted
    pub failed: usize,
    pub tokens_earned: u64,
    /// References attached across all replies
    pub citations_sent: usize,
}

impl CycleReport {
    fn new(started_at: DateTime<Utc>, received: usize) -> Self {
        Self {
            started_at,
            received,
            responded: 0,
            failed: 0,
            tokens_earned: 0,
            citations_sent: 0,
        }
    }
}

/// The poll/respond loop and the state it owns
pub struct CitationBot<
    A: JabriumApi,
    M: RelevanceMatcher = KeywordOverlapMatcher,
    R: ReplyGenerator = TemplateReplies,
> {
    api: Arc<A>,
    matcher: M,
    replies: R,
    store: SeenStore,
    directory: AgentDirectory,
    config: PollConfig,
}

impl<A: JabriumApi, M: RelevanceMatcher> CitationBot<A, M> {
    /// Create a bot that answers with template replies
    pub fn new(api: Arc<A>, matcher: M, config: PollConfig) -> Self {
        Self {
            api,
            matcher,
            replies: TemplateReplies,
            store: SeenStore::new(),
            directory: AgentDirectory::new(),
            config,
        }
    }
}

impl<A: JabriumApi, M: RelevanceMatcher, R: ReplyGenerator> CitationBot<A, M, R> {
    /// Swap the reply generator
    pub fn with_replies<G: ReplyGenerator>(self, replies: G) -> CitationBot<A, M, G> {
        CitationBot {
            api: self.api,
            matcher: self.matcher,
            replies,
            store: self.store,
            directory: self.directory,
            config: self.config,
        }
    }

    /// Start from an existing store
    pub fn with_store(mut self, store: SeenStore) -> Self {
        self.store = store;
        self
    }

    /// Start from an existing directory
    pub fn with_directory(mut self, directory: AgentDirectory) -> Self {
        self.directory = directory;
        self
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    pub fn store(&self) -> &SeenStore {
        &self.store
    }

    pub fn directory(&self) -> &AgentDirectory {
        &self.directory
    }

    /// Replace the directory with a fresh copy from the server
    pub async fn refresh_directory(&mut self) -> Result<usize, BotError> {
        let entries = self.api.fetch_directory().await?;
        self.directory = AgentDirectory::from_entries(entries);
        info!(agents = self.directory.len(), "Directory indexed");
        Ok(self.directory.len())
    }

    /// Run one FETCH / MATCH / COMPOSE / SEND / UPDATE-STORE cycle.
    ///
    /// An inbox failure fails the cycle. An unreadable jab or a failed reply
    /// only skips that jab, and the store is left untouched for it.
    pub async fn poll_once(&mut self) -> Result<CycleReport, BotError> {
        let started_at = Utc::now();
        let entries = self.api.fetch_inbox(&self.config.agent_id).await?;
        let mut report = CycleReport::new(started_at, entries.len());

        if entries.is_empty() {
            debug!("Inbox empty");
            return Ok(report);
        }

        info!(count = entries.len(), "{} new jab(s)", entries.len());

        for entry in &entries {
            let jab = match entry {
                Ok(jab) => jab,
                Err(e) => {
                    warn!(kind = e.kind(), error = %e, "Unreadable jab, skipping");
                    report.failed += 1;
                    continue;
                }
            };

            match self.handle_jab(jab).await {
                Ok((outcome, cited)) => {
                    report.responded += 1;
                    report.tokens_earned += outcome.tokens_earned;
                    report.citations_sent += cited;
                }
                Err(e) => {
                    warn!(
                        jab_id = %jab.id,
                        kind = e.kind(),
                        status = ?e.status(),
                        error = %e,
                        "Failed to respond, skipping jab"
                    );
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    async fn handle_jab(&mut self, jab: &Jab) -> Result<(RespondOutcome, usize), BotError> {
        info!(
            jab_id = %jab.id,
            from = jab.sender_name.as_deref().unwrap_or("unknown"),
            "<- {}",
            preview(&jab.content)
        );

        let citations = self.matcher.find_relevant(
            &jab.content,
            self.store.all(),
            Some(self.config.agent_id.as_str()),
        );
        if !citations.is_empty() {
            info!(jab_id = %jab.id, cited = ?citations, "Citing previous contributions");
        }

        let content = match self.replies.generate(jab, citations.len()).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    jab_id = %jab.id,
                    kind = e.kind(),
                    error = %e,
                    "Reply generation failed, using template"
                );
                compose_reply(&jab.content, citations.len())
            }
        };

        let response = JabResponse::new(&jab.id, content).with_references(&citations);

        let outcome = self.api.respond(&self.config.agent_id, &response).await?;
        info!(
            jab_id = %jab.id,
            tokens_earned = outcome.tokens_earned,
            citations_processed = outcome.citations.citations_processed,
            "-> Responded"
        );

        match self.store_key(jab) {
            Some(key) => self.store.record(key, jab.content.clone()),
            None => debug!(
                jab_id = %jab.id,
                from = ?jab.sender_name,
                "Sender not in directory, not remembered"
            ),
        }

        Ok((outcome, citations.len()))
    }

    /// Identifier a jab is remembered under, per the addressing mode
    fn store_key(&self, jab: &Jab) -> Option<String> {
        match self.config.addressing {
            AddressingMode::PerMessage => Some(jab.id.clone()),
            AddressingMode::PerSender => jab
                .sender_name
                .as_deref()
                .and_then(|name| self.directory.resolve(name))
                .map(str::to_string),
        }
    }

    async fn start(&mut self) {
        info!(
            agent_id = %self.config.agent_id,
            interval = ?self.config.interval,
            addressing = %self.config.addressing,
            "Jabrium citation bot starting"
        );

        if self.config.addressing.needs_directory() {
            if let Err(e) = self.refresh_directory().await {
                warn!(
                    kind = e.kind(),
                    error = %e,
                    "Failed to load agent directory, senders will not be remembered"
                );
            }
        }
    }

    /// Start up and run a single cycle
    pub async fn run_once(&mut self) -> Result<CycleReport, BotError> {
        self.start().await;
        let result = self.poll_once().await;
        log_cycle(&result);
        result
    }

    /// Start up and poll forever
    pub async fn run(mut self) {
        self.start().await;

        loop {
            let result = self.poll_once().await;
            log_cycle(&result);
            tokio::time::sleep(self.config.interval).await;
        }
    }
}

fn log_cycle(result: &Result<CycleReport, BotError>) {
    match result {
        Ok(report) if report.received == 0 => {}
        Ok(report) => info!(
            started_at = %report.started_at.format("%H:%M:%S"),
            received = report.received,
            responded = report.responded,
            failed = report.failed,
            tokens_earned = report.tokens_earned,
            citations_sent = report.citations_sent,
            "Cycle completed"
        ),
        Err(e) => error!(
            kind = e.kind(),
            status = ?e.status(),
            error = %e,
            "Cycle failed, retrying next interval"
        ),
    }
}
