//! # Utilities Module
//!
//! Internal utility modules for the core-logic crate.
//! These modules are marked as `pub(crate)` to enforce API boundaries.

pub(crate) mod credentials;
pub(crate) mod logger;

// Selective exports - only public utilities
pub use credentials::{Credential, CredentialStore};
pub use logger::{setup_logger, SWEEP_TARGET};
