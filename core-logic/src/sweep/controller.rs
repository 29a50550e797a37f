use super::drainer::{drain, DrainOutcome};
use crate::config::SweepConfig;
use crate::error::{ConfigError, CoreError};
use crate::mailbox::{Cursor, Endpoint};
use crate::metrics::MetricsCollector;
use crate::traits::ApiClient;
use std::sync::Arc;
use tracing::{info, Instrument};

/// Totals of a finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Passes started over the client list, the final one included.
    pub passes: u32,
    /// Fixed-interval sleeps taken because every client was rate limited.
    pub backoffs: u32,
    pub pages: u64,
    pub deleted: u64,
    pub failed: u64,
    /// Index of the client that confirmed the mailbox empty.
    pub cleared_by: Option<usize>,
}

enum ClientOutcome {
    MailboxEmpty,
    RateLimited(Endpoint),
}

/// Rotates over the clients until one of them drains both endpoints.
///
/// All rotation state lives here; nothing is process-wide.
pub struct RunController {
    clients: Vec<Arc<dyn ApiClient>>,
    received_cursor: Cursor,
    sent_cursor: Cursor,
    config: SweepConfig,
}

impl RunController {
    pub fn new(clients: Vec<Arc<dyn ApiClient>>, config: SweepConfig) -> Result<Self, CoreError> {
        if clients.is_empty() {
            return Err(ConfigError::NoClients.into());
        }
        config.validate()?;

        Ok(Self {
            clients,
            received_cursor: Cursor::NEWEST,
            sent_cursor: Cursor::NEWEST,
            config,
        })
    }

    /// Cursor handed to every drain of `endpoint`. It is never advanced,
    /// so each fetch asks for the newest page.
    pub fn cursor(&self, endpoint: Endpoint) -> Cursor {
        match endpoint {
            Endpoint::Received => self.received_cursor,
            Endpoint::Sent => self.sent_cursor,
        }
    }

    /// Runs passes until the mailbox is confirmed empty.
    ///
    /// Returns early with the first fetch error; there is no partial state
    /// to resume from.
    pub async fn run(&self) -> Result<RunSummary, CoreError> {
        info!(target: "sweep", "Total apps: {}", self.clients.len());
        let mut summary = RunSummary::default();

        loop {
            summary.passes += 1;

            for (idx, client) in self.clients.iter().enumerate() {
                let span =
                    tracing::info_span!(target: "sweep", "client", client_id = %client.label());

                match self.sweep_client(client, &mut summary).instrument(span).await? {
                    ClientOutcome::MailboxEmpty => {
                        info!(target: "sweep", "All clear, shutting down");
                        summary.cleared_by = Some(idx);
                        return Ok(summary);
                    }
                    ClientOutcome::RateLimited(endpoint) => {
                        info!(
                            target: "sweep",
                            "App {} RATE LIMITED on {} DMs, rotating", client.label(), endpoint
                        );
                    }
                }
            }

            summary.backoffs += 1;
            MetricsCollector::global().record_backoff();
            info!(
                target: "sweep",
                "All apps are RATE LIMITED, will run again after {}m",
                self.config.backoff.as_secs() / 60
            );
            tokio::time::sleep(self.config.backoff).await;
        }
    }

    async fn sweep_client(
        &self,
        client: &Arc<dyn ApiClient>,
        summary: &mut RunSummary,
    ) -> Result<ClientOutcome, CoreError> {
        for endpoint in Endpoint::ALL {
            let cursor = self.cursor(endpoint);
            let outcome = drain(client, endpoint, cursor, self.config.page_size).await?;

            let stats = outcome.stats();
            summary.pages += stats.pages;
            summary.deleted += stats.deleted;
            summary.failed += stats.failed;

            if let DrainOutcome::RateLimited(_) = outcome {
                return Ok(ClientOutcome::RateLimited(endpoint));
            }
        }
        Ok(ClientOutcome::MailboxEmpty)
    }
}
