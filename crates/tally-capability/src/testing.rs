//! Scriptable capability source for tests and the headless demo.
//!
//! Not gated behind `cfg(test)`: integration tests in dependent crates and
//! the demo binary both drive the shell with scripted sources.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tally_core::PermissionStatus;

use crate::error::CapabilityError;
use crate::source::CapabilitySource;

/// A capability source whose status, request outcome, and failure mode are
/// scripted by the test.
#[derive(Debug)]
pub struct ScriptedSource {
    status: RwLock<PermissionStatus>,
    request_result: RwLock<PermissionStatus>,
    fail_status: AtomicBool,
    fail_request: AtomicBool,
    status_delay: RwLock<Option<Duration>>,
    status_calls: AtomicUsize,
    request_calls: AtomicUsize,
}

impl ScriptedSource {
    /// Source that currently reports `status`; requests resolve to the
    /// same status until scripted otherwise.
    pub fn new(status: PermissionStatus) -> Self {
        Self {
            status: RwLock::new(status),
            request_result: RwLock::new(status),
            fail_status: AtomicBool::new(false),
            fail_request: AtomicBool::new(false),
            status_delay: RwLock::new(None),
            status_calls: AtomicUsize::new(0),
            request_calls: AtomicUsize::new(0),
        }
    }

    /// Default-denied source (not granted, can ask again).
    pub fn denied() -> Self {
        Self::new(PermissionStatus::default_denied())
    }

    /// Already-granted source.
    pub fn granted() -> Self {
        Self::new(PermissionStatus::granted())
    }

    /// Override the currently reported status.
    pub async fn set_status(&self, status: PermissionStatus) {
        *self.status.write().await = status;
    }

    /// Script the outcome of the next `request()` calls. The outcome is
    /// also applied as the reported status once a request resolves,
    /// mirroring the platform permission store.
    pub async fn set_request_result(&self, status: PermissionStatus) {
        *self.request_result.write().await = status;
    }

    /// Delay every `status()` call, keeping a refresh in flight long
    /// enough for overlap tests.
    pub async fn set_status_delay(&self, delay: Duration) {
        *self.status_delay.write().await = Some(delay);
    }

    /// Make `status()` fail until cleared.
    pub fn fail_status(&self, fail: bool) {
        self.fail_status.store(fail, Ordering::SeqCst);
    }

    /// Make `request()` fail until cleared.
    pub fn fail_request(&self, fail: bool) {
        self.fail_request.store(fail, Ordering::SeqCst);
    }

    /// Number of `status()` calls observed.
    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Number of `request()` calls observed.
    pub fn request_calls(&self) -> usize {
        self.request_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CapabilitySource for ScriptedSource {
    async fn status(&self) -> Result<PermissionStatus, CapabilityError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = *self.status_delay.read().await {
            tokio::time::sleep(delay).await;
        }
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(CapabilityError::Unavailable("scripted failure".into()));
        }
        Ok(*self.status.read().await)
    }

    async fn request(&self) -> Result<PermissionStatus, CapabilityError> {
        self.request_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_request.load(Ordering::SeqCst) {
            return Err(CapabilityError::Unavailable("scripted failure".into()));
        }
        let result = *self.request_result.read().await;
        *self.status.write().await = result;
        Ok(result)
    }
}
