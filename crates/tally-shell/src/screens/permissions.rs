//! Permissions tab: a projection of the current snapshot into four rows.
//!
//! Tap dispatch and notice mapping are display logic layered on top of the
//! reconciliation engine; the engine itself never talks to the user.

use tally_core::{PermissionKind, PermissionSnapshot, PermissionStatus};

use crate::reconcile::RequestOutcome;

/// Screen-level description shown above the rows.
pub const DESCRIPTION: &str =
    "Enable access to automate receipt capture and mileage tracking.";

/// One row in the permissions card.
#[derive(Debug, Clone, Copy)]
pub struct PermissionRow {
    pub kind: PermissionKind,
    pub name: &'static str,
    pub description: &'static str,
    pub status: PermissionStatus,
}

/// Per-kind row copy.
const fn row_description(kind: PermissionKind) -> &'static str {
    match kind {
        PermissionKind::Camera => "Scan paper receipts instantly",
        PermissionKind::Photos => "Organize receipts from gallery",
        PermissionKind::Messages => "Auto-detect receipt confirmations",
        PermissionKind::Location => "Log transaction locations",
    }
}

/// Project a snapshot into display rows, in card order.
pub fn rows(snapshot: &PermissionSnapshot) -> [PermissionRow; 4] {
    PermissionKind::ALL.map(|kind| PermissionRow {
        kind,
        name: kind.display_name(),
        description: row_description(kind),
        status: snapshot.get(kind),
    })
}

/// What a tap on a row should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// Dispatch a permission request.
    Request(PermissionKind),
    /// Granted Messages: revocation is managed by the system settings.
    SystemManagedNotice,
    /// Denied and no native prompt available: direct to settings.
    OpenSettingsNotice(PermissionKind),
    /// Granted and nothing to re-request.
    Ignore,
}

/// Decide the tap behavior for one row.
pub fn tap_action(kind: PermissionKind, status: PermissionStatus) -> TapAction {
    if status.granted {
        if kind == PermissionKind::Messages {
            return TapAction::SystemManagedNotice;
        }
        return TapAction::Ignore;
    }
    if !status.can_ask_again {
        return TapAction::OpenSettingsNotice(kind);
    }
    TapAction::Request(kind)
}

/// User-visible notices raised by the permissions screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Revoking SMS access happens in system settings, not in-app.
    SystemManaged,
    /// The permission must be enabled from system settings.
    OpenSettings(PermissionKind),
    /// The prompt was dismissed with "don't ask again".
    PermanentlyDenied(PermissionKind),
    /// The prompt was dismissed without granting.
    Denied(PermissionKind),
    /// No provider exists on this platform.
    NotSupported(PermissionKind),
    /// The permission was already granted; no prompt was shown.
    AlreadyGranted(PermissionKind),
}

impl Notice {
    /// Message body for the notice dialog.
    pub fn message(&self) -> String {
        match self {
            Self::SystemManaged => {
                "SMS permissions are managed by the system. To revoke this permission, \
                 go to Settings > Apps > Permissions."
                    .to_string()
            }
            Self::OpenSettings(kind) => format!(
                "{} permission is needed. Please enable it in Settings.",
                kind.display_name()
            ),
            Self::PermanentlyDenied(_) => {
                "This permission has been permanently denied. Enable it from system settings."
                    .to_string()
            }
            Self::Denied(_) => {
                "Permission was denied. You can try requesting it again or enable it in Settings."
                    .to_string()
            }
            Self::NotSupported(kind) => format!(
                "{} access is not available on this platform.",
                kind.display_name()
            ),
            Self::AlreadyGranted(kind) => {
                format!("{} access is already granted.", kind.display_name())
            }
        }
    }
}

/// Map a request outcome to the notice the screen should show, if any.
pub fn notice_for_outcome(kind: PermissionKind, outcome: RequestOutcome) -> Option<Notice> {
    match outcome {
        RequestOutcome::NotSupported => Some(Notice::NotSupported(kind)),
        RequestOutcome::AlreadyGranted => Some(Notice::AlreadyGranted(kind)),
        RequestOutcome::Completed(status) => {
            if status.granted {
                None
            } else if status.can_ask_again {
                Some(Notice::Denied(kind))
            } else {
                Some(Notice::PermanentlyDenied(kind))
            }
        }
    }
}
