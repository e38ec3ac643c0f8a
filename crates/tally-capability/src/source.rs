//! The capability source trait.
//!
//! Every platform permission subsystem -- polled or event-driven -- is
//! presented to the reconciliation engine through this one interface, so
//! the engine's refresh logic is source-agnostic.

use async_trait::async_trait;

use tally_core::PermissionStatus;

use crate::error::CapabilityError;

/// A single device capability the user can grant or deny.
///
/// Implementations wrap a platform subsystem (camera, location, photo
/// library, SMS). Errors are recovered by the engine, never propagated to
/// screens.
#[async_trait]
pub trait CapabilitySource: Send + Sync {
    /// Current status without prompting the user.
    async fn status(&self) -> Result<PermissionStatus, CapabilityError>;

    /// Request access. May display a native system prompt as a side effect
    /// outside this system's control.
    async fn request(&self) -> Result<PermissionStatus, CapabilityError>;
}
