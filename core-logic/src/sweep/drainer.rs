use super::deleter::delete_batch;
use super::fetcher::{fetch_page, FetchOutcome};
use crate::error::CoreError;
use crate::mailbox::{Cursor, Endpoint};
use crate::traits::ApiClient;
use std::sync::Arc;
use tracing::info;

/// Work done by one drain call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainStats {
    /// List requests that returned a page, the final empty one included.
    pub pages: u64,
    pub deleted: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// The endpoint returned an empty page.
    Drained(DrainStats),
    RateLimited(DrainStats),
}

impl DrainOutcome {
    pub fn stats(&self) -> DrainStats {
        match self {
            DrainOutcome::Drained(s) | DrainOutcome::RateLimited(s) => *s,
        }
    }
}

/// Fetches and deletes pages of `endpoint` until it is empty or the
/// client gets rate limited. Fetch errors are returned as-is.
pub async fn drain(
    client: &Arc<dyn ApiClient>,
    endpoint: Endpoint,
    cursor: Cursor,
    page_size: u32,
) -> Result<DrainOutcome, CoreError> {
    let mut stats = DrainStats::default();

    loop {
        info!(target: "sweep", "Scanning {} DMs", endpoint);

        let ids = match fetch_page(client.as_ref(), endpoint, cursor, page_size).await? {
            FetchOutcome::RateLimited => {
                info!(target: "sweep", "RATE LIMITED while listing {} DMs", endpoint);
                return Ok(DrainOutcome::RateLimited(stats));
            }
            FetchOutcome::Page(ids) => ids,
        };
        stats.pages += 1;

        if ids.is_empty() {
            info!(target: "sweep", "No {} DMs left to delete", endpoint);
            return Ok(DrainOutcome::Drained(stats));
        }

        info!(target: "sweep", "{} {} DMs will be deleted", ids.len(), endpoint);

        let outcome = delete_batch(Arc::clone(client), ids).await;
        let report = outcome.report();
        stats.deleted += report.deleted as u64;
        stats.failed += report.failed() as u64;

        if outcome.is_rate_limited() {
            info!(
                target: "sweep",
                "RATE LIMITED after {} deletions ({} DMs)", report.deleted, endpoint
            );
            return Ok(DrainOutcome::RateLimited(stats));
        }

        info!(
            target: "sweep",
            "DELETED {} {} DMs ({} failed)", report.deleted, endpoint, report.failed()
        );
    }
}
