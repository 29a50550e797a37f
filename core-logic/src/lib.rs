//! # Core Logic - Direct Message Sweep Engine
//!
//! This crate provides the platform-independent part of the sweeper: the
//! rate-limit-aware scan-and-delete engine plus the shared plumbing every
//! platform binary needs.
//!
//! ## Modules
//!
//! - [`config`] - Engine tunables (page size, backoff interval)
//! - [`error`] - Typed error handling with thiserror
//! - [`mailbox`] - Endpoints, message ids and pagination cursors
//! - [`metrics`] - Deletion and fetch metrics collection
//! - [`sweep`] - Page fetcher, batch deleter, endpoint drainer, run controller
//! - [`traits`] - The authenticated API client seam
//! - `utils` - Keys file loading and logger setup

pub mod config;
pub mod error;
pub mod mailbox;
pub mod metrics;
pub mod sweep;
pub mod traits;
pub(crate) mod utils;

// Selective exports - only public API types
pub use config::{ProxyConfig, SweepConfig, DEFAULT_BACKOFF, MAX_PAGE_SIZE};
pub use error::{ConfigError, CoreError, CredentialError, NetworkError};
pub use mailbox::{Cursor, Endpoint, MessageId, DESTROY_PATH};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use sweep::{
    delete_batch, delete_message, drain, fetch_page, BatchOutcome, BatchReport, DeleteOutcome,
    DrainOutcome, DrainStats, FetchOutcome, RunController, RunSummary,
};
pub use traits::{ApiClient, ApiReply};

pub use utils::{setup_logger, Credential, CredentialStore, SWEEP_TARGET};
