//! Permission reconciliation engine.
//!
//! Owns the authoritative [`PermissionSnapshot`], keeps it fresh across
//! several trigger cadences, and prevents UI flicker from transient or
//! erroneous provider reads. Screens consume read-only snapshots through a
//! watch channel and call back in through [`ReconcileEngine::request_permission`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tally_capability::{Availability, CapabilitySource};
use tally_core::config::ReconcilerConfig;
use tally_core::{PermissionKind, PermissionSnapshot, PermissionStatus};

use super::memo::StabilityMemo;
use super::scheduler::TaskScheduler;

const POST_REQUEST_SHORT: &str = "post-request-short";
const POST_REQUEST_LONG: &str = "post-request-long";
const FOREGROUND_SETTLE: &str = "foreground-settle";

/// One capability source per permission kind.
pub struct CapabilitySet {
    pub camera: Arc<dyn CapabilitySource>,
    pub location: Arc<dyn CapabilitySource>,
    pub photos: Arc<dyn CapabilitySource>,
    pub messages: Arc<dyn CapabilitySource>,
}

impl CapabilitySet {
    fn get(&self, kind: PermissionKind) -> &Arc<dyn CapabilitySource> {
        match kind {
            PermissionKind::Camera => &self.camera,
            PermissionKind::Location => &self.location,
            PermissionKind::Photos => &self.photos,
            PermissionKind::Messages => &self.messages,
        }
    }
}

/// Outcome of a permission request, surfaced to the screen layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The provider's request resolved (prompt shown or provider failed;
    /// failures degrade to the default-denied status).
    Completed(PermissionStatus),
    /// Messages was already granted; the native prompt was skipped.
    AlreadyGranted,
    /// The capability has no provider on this platform.
    NotSupported,
}

/// The single authoritative owner of permission state.
pub struct ReconcileEngine {
    sources: CapabilitySet,
    availability: Availability,
    config: ReconcilerConfig,
    snapshot_tx: watch::Sender<PermissionSnapshot>,
    /// Serializes refreshes; the memo lives inside the lock so accepted
    /// values stay consistent with the refresh that produced them.
    gate: Mutex<StabilityMemo>,
    /// Set while a refresh is waiting for the gate; further calls coalesce.
    queued: AtomicBool,
    scheduler: TaskScheduler,
}

impl ReconcileEngine {
    pub fn new(sources: CapabilitySet, availability: Availability, config: ReconcilerConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(PermissionSnapshot::default_denied());
        Self {
            sources,
            availability,
            config,
            snapshot_tx,
            gate: Mutex::new(StabilityMemo::new()),
            queued: AtomicBool::new(false),
            scheduler: TaskScheduler::new(),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> PermissionSnapshot {
        *self.snapshot_tx.borrow()
    }

    /// Subscribe to snapshot updates. The channel only fires when at least
    /// one `(granted, can_ask_again)` pair actually changed.
    pub fn subscribe(&self) -> watch::Receiver<PermissionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub const fn availability(&self) -> Availability {
        self.availability
    }

    /// Query all providers, merge, and publish if anything changed.
    ///
    /// Safe to invoke concurrently with itself: a call arriving while one
    /// is in flight waits for it, and at most one waiter is kept -- later
    /// concurrent calls coalesce into the queued one. Returns whether a
    /// new snapshot was published by this call.
    pub async fn refresh(&self) -> bool {
        if self.queued.swap(true, Ordering::SeqCst) {
            // A refresh is already queued behind the in-flight one.
            debug!("Refresh coalesced into pending pass");
            return false;
        }
        let mut memo = self.gate.lock().await;
        self.queued.store(false, Ordering::SeqCst);
        self.refresh_locked(&mut memo).await
    }

    async fn refresh_locked(&self, memo: &mut StabilityMemo) -> bool {
        let (camera, location, photos, messages) = tokio::join!(
            self.read_status(PermissionKind::Camera),
            self.read_status(PermissionKind::Location),
            self.read_status(PermissionKind::Photos),
            self.read_status(PermissionKind::Messages),
        );
        let candidate = PermissionSnapshot {
            camera,
            location,
            photos,
            messages,
        };

        // Camera stability rule: a granted camera that suddenly reads
        // denied is treated as a transient false negative, and the whole
        // candidate is discarded with it.
        if memo.suppresses(candidate.camera.granted) {
            debug!("Discarding refresh candidate: camera flicker suppressed");
            return false;
        }
        memo.accept(candidate.camera.granted);

        let changed = self.snapshot_tx.send_if_modified(|current| {
            if candidate.differs_from(current) {
                *current = candidate;
                true
            } else {
                false
            }
        });

        if changed {
            info!(
                camera = candidate.camera.granted,
                location = candidate.location.granted,
                photos = candidate.photos.granted,
                messages = candidate.messages.granted,
                "Permission snapshot updated"
            );
        } else {
            debug!("Refresh produced no changes");
        }
        changed
    }

    async fn read_status(&self, kind: PermissionKind) -> PermissionStatus {
        if !self.availability.supports(kind) {
            return PermissionStatus::default_denied();
        }
        match self.sources.get(kind).status().await {
            Ok(status) => status,
            Err(error) => {
                warn!(kind = %kind, %error, "Capability query failed; substituting default-denied");
                PermissionStatus::default_denied()
            }
        }
    }

    /// Request access for one kind.
    ///
    /// Never returns an error: provider failures degrade to the
    /// default-denied status. After any request resolves, two delayed
    /// refreshes are scheduled because the OS permission store is
    /// eventually consistent shortly after a prompt is dismissed.
    pub async fn request_permission(self: &Arc<Self>, kind: PermissionKind) -> RequestOutcome {
        if !self.availability.supports(kind) {
            info!(kind = %kind, platform = self.availability.platform().as_str(),
                "Permission request not supported on this platform");
            return RequestOutcome::NotSupported;
        }

        if kind == PermissionKind::Messages && self.snapshot().get(kind).granted {
            debug!("Messages permission already granted; skipping native prompt");
            return RequestOutcome::AlreadyGranted;
        }

        let status = match self.sources.get(kind).request().await {
            Ok(status) => status,
            Err(error) => {
                warn!(kind = %kind, %error, "Permission request failed; substituting default-denied");
                PermissionStatus::default_denied()
            }
        };

        info!(kind = %kind, granted = status.granted, can_ask_again = status.can_ask_again,
            "Permission request resolved");
        self.schedule_post_request_refreshes().await;
        RequestOutcome::Completed(status)
    }

    /// Two-phase refresh after a prompt: a short delay, then a longer one.
    /// A new request replaces any still-pending post-request refreshes.
    async fn schedule_post_request_refreshes(self: &Arc<Self>) {
        let engine = Arc::clone(self);
        self.scheduler
            .schedule(POST_REQUEST_SHORT, self.config.post_request_short(), async move {
                engine.refresh().await;
            })
            .await;

        let engine = Arc::clone(self);
        self.scheduler
            .schedule(POST_REQUEST_LONG, self.config.post_request_long(), async move {
                engine.refresh().await;
            })
            .await;
    }

    /// The host process returned to the foreground; refresh after a short
    /// settle delay so the platform has finished restoring state.
    pub async fn notify_foreground(self: &Arc<Self>) {
        let engine = Arc::clone(self);
        self.scheduler
            .schedule(FOREGROUND_SETTLE, self.config.foreground_settle(), async move {
                engine.refresh().await;
            })
            .await;
    }

    /// Spawn the trigger schedule: one refresh at start, then a fixed
    /// periodic timer until `shutdown` fires.
    pub fn spawn_poll_task(
        self: &Arc<Self>,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            engine.refresh().await;

            let mut timer = tokio::time::interval(engine.config.poll_interval());
            timer.tick().await; // Skip first immediate tick

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        engine.refresh().await;
                    }
                    _ = shutdown.changed() => {
                        engine.scheduler.cancel_all().await;
                        info!("Permission poll task shutting down");
                        return;
                    }
                }
            }
        })
    }
}
