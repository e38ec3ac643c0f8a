//! Per-kind capability availability.
//!
//! Resolved once at startup and consulted by both `refresh()` and
//! `request_permission()`, instead of platform checks scattered through
//! the engine. SMS reading exists only on Android.

use serde::{Deserialize, Serialize};

use tally_core::PermissionKind;

/// Host platform, as far as capability availability is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    /// Web preview, simulators without native capability support, etc.
    Other,
}

impl Platform {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Other => "other",
        }
    }
}

/// Which capabilities can be queried/requested on this platform.
#[derive(Debug, Clone, Copy)]
pub struct Availability {
    platform: Platform,
    messages: bool,
}

impl Availability {
    /// Resolve the availability matrix for a platform.
    pub const fn resolve(platform: Platform) -> Self {
        Self {
            platform,
            messages: matches!(platform, Platform::Android),
        }
    }

    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether `kind` has a native provider on this platform.
    pub const fn supports(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::Camera | PermissionKind::Location | PermissionKind::Photos => true,
            PermissionKind::Messages => self.messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_only_on_android() {
        assert!(Availability::resolve(Platform::Android).supports(PermissionKind::Messages));
        assert!(!Availability::resolve(Platform::Ios).supports(PermissionKind::Messages));
        assert!(!Availability::resolve(Platform::Other).supports(PermissionKind::Messages));
    }

    #[test]
    fn other_kinds_everywhere() {
        for platform in [Platform::Android, Platform::Ios, Platform::Other] {
            let availability = Availability::resolve(platform);
            assert!(availability.supports(PermissionKind::Camera));
            assert!(availability.supports(PermissionKind::Location));
            assert!(availability.supports(PermissionKind::Photos));
        }
    }
}
