//! Capability provider errors.
//!
//! Nothing here is fatal: the reconciliation engine substitutes the
//! default-denied status for any failing provider and logs the error.

use thiserror::Error;

/// Errors surfaced by capability sources.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The platform subsystem failed or is not reachable.
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    /// The capability does not exist on this platform.
    #[error("Capability not supported on this platform")]
    Unsupported,
}
