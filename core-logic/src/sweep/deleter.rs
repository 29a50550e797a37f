use crate::error::NetworkError;
use crate::mailbox::{MessageId, DESTROY_PATH};
use crate::metrics::MetricsCollector;
use crate::traits::ApiClient;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, warn, Instrument};

/// Result of destroying one message.
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    Deleted,
    RateLimited,
    Failed(NetworkError),
}

/// Tally of one concurrent batch.
#[derive(Debug, Default, Clone)]
pub struct BatchReport {
    pub deleted: usize,
    pub rate_limited: usize,
    pub errors: Vec<(MessageId, NetworkError)>,
    /// Deletion tasks that panicked before producing an outcome.
    pub aborted: usize,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.errors.len() + self.aborted
    }
}

#[derive(Debug, Clone)]
pub enum BatchOutcome {
    Completed(BatchReport),
    /// At least one deletion hit a 429. The caller must stop using this
    /// client for the current endpoint.
    RateLimited(BatchReport),
}

impl BatchOutcome {
    pub fn report(&self) -> &BatchReport {
        match self {
            BatchOutcome::Completed(r) | BatchOutcome::RateLimited(r) => r,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, BatchOutcome::RateLimited(_))
    }
}

pub async fn delete_message(client: &dyn ApiClient, id: MessageId) -> DeleteOutcome {
    let form = [("id".to_string(), id.to_string())];
    match client.post_form(DESTROY_PATH, &form).await {
        Ok(reply) if reply.is_ok() => DeleteOutcome::Deleted,
        Ok(reply) if reply.is_rate_limited() => DeleteOutcome::RateLimited,
        Ok(reply) => DeleteOutcome::Failed(NetworkError::HttpError {
            status_code: reply.status,
            endpoint: DESTROY_PATH.to_string(),
        }),
        Err(e) => DeleteOutcome::Failed(e),
    }
}

/// Destroys every id concurrently and waits for all of them.
///
/// Individual failures are logged and tallied, never retried. A single
/// rate-limited deletion marks the whole batch as rate limited, but the
/// in-flight siblings still run to completion.
pub async fn delete_batch(client: Arc<dyn ApiClient>, ids: Vec<MessageId>) -> BatchOutcome {
    let mut set = JoinSet::new();

    for id in ids {
        let client = Arc::clone(&client);
        set.spawn(
            async move {
                let outcome = delete_message(client.as_ref(), id).await;
                (id, outcome)
            }
            .in_current_span(),
        );
    }

    let metrics = MetricsCollector::global();
    let mut report = BatchReport::default();

    while let Some(res) = set.join_next().await {
        match res {
            Ok((_, DeleteOutcome::Deleted)) => {
                metrics.record_delete(true);
                report.deleted += 1;
            }
            Ok((_, DeleteOutcome::RateLimited)) => {
                metrics.record_rate_limit();
                report.rate_limited += 1;
            }
            Ok((id, DeleteOutcome::Failed(e))) => {
                warn!("DM {} delete FAILED: {}", id, e);
                metrics.record_delete(false);
                report.errors.push((id, e));
            }
            Err(e) => {
                error!("A delete task panicked or failed to join: {:?}", e);
                metrics.record_delete(false);
                report.aborted += 1;
            }
        }
    }

    if report.rate_limited > 0 {
        BatchOutcome::RateLimited(report)
    } else {
        BatchOutcome::Completed(report)
    }
}
