//! # Sweep Engine
//!
//! Rate-limit-aware scan-and-delete loop over one mailbox shared by
//! several credentials.
//!
//! - [`fetcher`] - one page of message ids from a list endpoint
//! - [`deleter`] - concurrent destroy requests for one page
//! - [`drainer`] - fetch/delete cycles until drained or rate limited
//! - [`controller`] - credential rotation, backoff and termination

pub mod controller;
pub mod deleter;
pub mod drainer;
pub mod fetcher;

pub use controller::{RunController, RunSummary};
pub use deleter::{delete_batch, delete_message, BatchOutcome, BatchReport, DeleteOutcome};
pub use drainer::{drain, DrainOutcome, DrainStats};
pub use fetcher::{fetch_page, FetchOutcome};
