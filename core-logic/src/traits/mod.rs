use crate::error::NetworkError;
use async_trait::async_trait;

/// Status the remote API answers with once a credential exhausted its quota.
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;
pub const STATUS_OK: u16 = 200;

/// Raw HTTP answer. Status interpretation is left to the sweep engine.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == STATUS_TOO_MANY_REQUESTS
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// An authenticated handle on the remote API, built from one credential.
///
/// Implementations must tolerate many concurrent in-flight requests; the
/// batch deleter shares one client across every deletion of a page.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Short label used in logs, e.g. `"001"`.
    fn label(&self) -> &str;

    /// Issues an authorized GET to `path` (relative to the API base).
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiReply, NetworkError>;

    /// Issues an authorized form POST to `path` (relative to the API base).
    async fn post_form(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<ApiReply, NetworkError>;
}
