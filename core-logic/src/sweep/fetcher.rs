use crate::error::NetworkError;
use crate::mailbox::{Cursor, Endpoint, ListedMessage, MessageId};
use crate::metrics::MetricsCollector;
use crate::traits::ApiClient;
use std::time::Instant;
use tracing::debug;

/// Result of a single list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Newest pending ids. Empty means the endpoint is drained.
    Page(Vec<MessageId>),
    RateLimited,
}

/// Requests up to `page_size` ids from `endpoint`.
///
/// A 429 is an expected outcome, not an error. Any other non-200 status,
/// a transport failure or an undecodable body is returned as `Err`.
pub async fn fetch_page(
    client: &dyn ApiClient,
    endpoint: Endpoint,
    cursor: Cursor,
    page_size: u32,
) -> Result<FetchOutcome, NetworkError> {
    let mut query = vec![("count".to_string(), page_size.to_string())];
    if let Some(max_id) = cursor.max_id() {
        query.push(("max_id".to_string(), max_id.to_string()));
    }

    let started = Instant::now();
    let reply = client.get(endpoint.path(), &query).await?;

    if reply.is_rate_limited() {
        debug!("{} list rate limited for client {}", endpoint, client.label());
        MetricsCollector::global().record_rate_limit();
        return Ok(FetchOutcome::RateLimited);
    }

    if !reply.is_ok() {
        return Err(NetworkError::HttpError {
            status_code: reply.status,
            endpoint: endpoint.path().to_string(),
        });
    }

    let ids = parse_ids(endpoint, &reply.body)?;
    MetricsCollector::global().record_page(ids.len(), started.elapsed());
    Ok(FetchOutcome::Page(ids))
}

fn parse_ids(endpoint: Endpoint, body: &str) -> Result<Vec<MessageId>, NetworkError> {
    let listed: Vec<ListedMessage> =
        serde_json::from_str(body).map_err(|e| NetworkError::InvalidResponse {
            endpoint: endpoint.path().to_string(),
            reason: e.to_string(),
        })?;

    listed
        .into_iter()
        .map(|m| {
            m.id_str
                .parse::<MessageId>()
                .map_err(|e| NetworkError::InvalidResponse {
                    endpoint: endpoint.path().to_string(),
                    reason: format!("bad id_str '{}': {}", m.id_str, e),
                })
        })
        .collect()
}
