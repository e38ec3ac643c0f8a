//! Push adapter for event-driven capability subsystems.
//!
//! The camera subsystem reports its permission state through a
//! subscription rather than a pull call. [`PushSource`] stores the latest
//! pushed value and serves it as a synchronous getter, so the engine's
//! `refresh()` treats the camera like every other source.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use tally_core::PermissionStatus;

use crate::error::CapabilityError;
use crate::source::CapabilitySource;

type Latest = Arc<RwLock<Option<PermissionStatus>>>;

/// Publisher half handed to the platform event subscription.
#[derive(Clone)]
pub struct PushHandle {
    latest: Latest,
}

impl PushHandle {
    /// Record a pushed status as the new latest value.
    pub async fn publish(&self, status: PermissionStatus) {
        debug!(granted = status.granted, "Capability event pushed");
        *self.latest.write().await = Some(status);
    }
}

/// Capability source backed by the latest pushed value.
///
/// Until the subscription delivers its first event, `status()` falls back
/// to querying the wrapped source directly so startup refreshes don't
/// misread the capability as denied.
pub struct PushSource<S> {
    latest: Latest,
    inner: S,
}

impl<S: CapabilitySource> PushSource<S> {
    /// Wrap `inner`, returning the source and the publisher handle for the
    /// platform subscription.
    pub fn subscribe(inner: S) -> (Self, PushHandle) {
        let latest: Latest = Arc::new(RwLock::new(None));
        let handle = PushHandle {
            latest: Arc::clone(&latest),
        };
        (Self { latest, inner }, handle)
    }
}

#[async_trait]
impl<S: CapabilitySource> CapabilitySource for PushSource<S> {
    async fn status(&self) -> Result<PermissionStatus, CapabilityError> {
        if let Some(status) = *self.latest.read().await {
            return Ok(status);
        }
        self.inner.status().await
    }

    async fn request(&self) -> Result<PermissionStatus, CapabilityError> {
        let status = self.inner.request().await?;
        // The prompt outcome is the freshest value we have.
        *self.latest.write().await = Some(status);
        Ok(status)
    }
}
