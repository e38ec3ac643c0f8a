//! Permission value types shared across the app shell.
//!
//! A [`PermissionSnapshot`] is the immutable merged view of all four
//! capability statuses at a point in time. Snapshots replace each other
//! atomically; consumers never observe a partially updated one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A device capability gated by user consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    /// Camera, for scanning paper receipts.
    Camera,
    /// Foreground location, for tagging transactions.
    Location,
    /// Photo library, for organizing saved receipts.
    Photos,
    /// SMS reading (Android only), for receipt confirmations.
    Messages,
}

impl PermissionKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 4] = [Self::Camera, Self::Photos, Self::Messages, Self::Location];

    /// Stable lowercase identifier, used in logs and config.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Location => "location",
            Self::Photos => "photos",
            Self::Messages => "messages",
        }
    }

    /// Human-readable name as shown in the permission rows.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::Location => "Location",
            Self::Photos => "Photos",
            Self::Messages => "Messages",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single capability as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionStatus {
    /// Whether access is currently granted.
    pub granted: bool,
    /// Whether the platform will show a native prompt again. `false` means
    /// the only recourse is directing the user to system settings.
    pub can_ask_again: bool,
}

impl PermissionStatus {
    /// The substitute used whenever a provider is unavailable or has not
    /// been asked yet: not granted, but still promptable.
    pub const fn default_denied() -> Self {
        Self {
            granted: false,
            can_ask_again: true,
        }
    }

    /// Granted status that can still be re-prompted.
    pub const fn granted() -> Self {
        Self {
            granted: true,
            can_ask_again: true,
        }
    }

    /// Denied with no further native prompts available.
    pub const fn permanently_denied() -> Self {
        Self {
            granted: false,
            can_ask_again: false,
        }
    }
}

impl Default for PermissionStatus {
    fn default() -> Self {
        Self::default_denied()
    }
}

/// Immutable merged view of all four capability statuses.
///
/// Every kind is always present. Equality compares every
/// `(granted, can_ask_again)` pair and drives no-op suppression in the
/// reconciliation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    pub camera: PermissionStatus,
    pub location: PermissionStatus,
    pub photos: PermissionStatus,
    pub messages: PermissionStatus,
}

impl PermissionSnapshot {
    /// Snapshot with every kind at the default-denied status.
    pub const fn default_denied() -> Self {
        Self {
            camera: PermissionStatus::default_denied(),
            location: PermissionStatus::default_denied(),
            photos: PermissionStatus::default_denied(),
            messages: PermissionStatus::default_denied(),
        }
    }

    /// Status for a single kind.
    pub const fn get(&self, kind: PermissionKind) -> PermissionStatus {
        match kind {
            PermissionKind::Camera => self.camera,
            PermissionKind::Location => self.location,
            PermissionKind::Photos => self.photos,
            PermissionKind::Messages => self.messages,
        }
    }

    /// Copy of this snapshot with one kind replaced.
    #[must_use]
    pub const fn with(mut self, kind: PermissionKind, status: PermissionStatus) -> Self {
        match kind {
            PermissionKind::Camera => self.camera = status,
            PermissionKind::Location => self.location = status,
            PermissionKind::Photos => self.photos = status,
            PermissionKind::Messages => self.messages = status,
        }
        self
    }

    /// Whether any field of any kind differs from `other`.
    pub fn differs_from(&self, other: &Self) -> bool {
        self != other
    }
}
