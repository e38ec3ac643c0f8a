//! Top-level shell: tab switching and cross-screen wiring.
//!
//! The shell owns the single drawer instance and the profile event
//! channel, and forwards permission taps into the reconciliation engine.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use tally_core::PermissionKind;
use tally_core::config::DrawerConfig;

use crate::drawer::DrawerController;
use crate::reconcile::ReconcileEngine;
use crate::screens::permissions::{self, Notice, TapAction};
use crate::screens::profile::{ProfileEvent, ProfileField, ProfileScreen};

/// The three bottom tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Profile,
    Permission,
    Email,
}

impl Tab {
    /// Header title shown for the active tab.
    pub const fn header_title(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Permission => "Permissions",
            Self::Email => "Emails",
        }
    }

    /// Title of the header help dialog.
    pub const fn help_title(self) -> &'static str {
        match self {
            Self::Profile => "Profile Help",
            Self::Permission => "Permissions Help",
            Self::Email => "Email Help",
        }
    }

    /// Body of the header help dialog.
    pub const fn help_message(self) -> &'static str {
        match self {
            Self::Profile => {
                "Need help with your profile?\n\n\
                 • Fill out your work information to get personalized categorization\n\
                 • Select what you hope to achieve for better recommendations\n\
                 • Choose your work type and sector for tailored features\n\
                 • All information helps improve your experience"
            }
            Self::Permission => {
                "Need help with permissions?\n\n\
                 • Toggle permissions by tapping on them\n\
                 • Green toggles mean permissions are granted\n\
                 • Red toggles mean permissions need attention\n\
                 • Camera: For scanning paper receipts\n\
                 • Photos: To organize existing receipts\n\
                 • Messages: Auto-detect receipt confirmations\n\
                 • Location: Log transaction locations"
            }
            Self::Email => {
                "Need help connecting your email?\n\n\
                 • Connect Gmail or Outlook for automatic receipt detection\n\
                 • We only scan for receipts, not personal emails\n\
                 • Your credentials are never shared with us\n\
                 • Tap the + button to connect your email provider\n\
                 • No more manual forwarding or uploads needed"
            }
        }
    }
}

/// Shell controller: active tab plus the shared pieces screens reach through.
pub struct AppShell {
    engine: Arc<ReconcileEngine>,
    drawer: DrawerController,
    profile: ProfileScreen,
    profile_tx: mpsc::UnboundedSender<ProfileEvent>,
    profile_rx: mpsc::UnboundedReceiver<ProfileEvent>,
    tab: Tab,
}

impl AppShell {
    pub fn new(engine: Arc<ReconcileEngine>, drawer_config: DrawerConfig) -> Self {
        let (profile_tx, profile_rx) = mpsc::unbounded_channel();
        Self {
            engine,
            drawer: DrawerController::new(drawer_config),
            profile: ProfileScreen::new(),
            profile_tx,
            profile_rx,
            tab: Tab::Permission,
        }
    }

    pub const fn tab(&self) -> Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if tab != self.tab {
            debug!(tab = tab.header_title(), "Switching tab");
            self.tab = tab;
        }
    }

    pub const fn engine(&self) -> &Arc<ReconcileEngine> {
        &self.engine
    }

    pub const fn drawer(&self) -> &DrawerController {
        &self.drawer
    }

    pub const fn drawer_mut(&mut self) -> &mut DrawerController {
        &mut self.drawer
    }

    pub const fn profile(&self) -> &ProfileScreen {
        &self.profile
    }

    /// Handle a tap on a permission row. Granted rows are inert except
    /// Messages, which surfaces the system-managed notice instead of a
    /// prompt; everything else goes through the engine.
    pub async fn tap_permission(&self, kind: PermissionKind) -> Option<Notice> {
        let status = self.engine.snapshot().get(kind);
        match permissions::tap_action(kind, status) {
            TapAction::Request(kind) => {
                let outcome = self.engine.request_permission(kind).await;
                permissions::notice_for_outcome(kind, outcome)
            }
            TapAction::SystemManagedNotice => Some(Notice::SystemManaged),
            TapAction::OpenSettingsNotice(kind) => Some(Notice::OpenSettings(kind)),
            TapAction::Ignore => None,
        }
    }

    /// Open the drawer with the picker for one profile field.
    pub fn open_profile_picker(&mut self, field: ProfileField) {
        let request = ProfileScreen::picker_request(field, self.profile_tx.clone());
        self.drawer.open(request);
    }

    /// Drain queued profile selections into the screen state.
    pub fn pump_profile_events(&mut self) {
        while let Ok(event) = self.profile_rx.try_recv() {
            self.profile.apply(event);
        }
    }

    /// The host process returned to the foreground.
    pub async fn on_foreground(&self) {
        self.engine.notify_foreground().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use tally_capability::testing::ScriptedSource;
    use tally_capability::{Availability, CapabilitySource, Platform};
    use tally_core::PermissionStatus;
    use tally_core::config::ReconcilerConfig;

    use crate::drawer::DrawerState;
    use crate::reconcile::CapabilitySet;

    use super::*;

    fn shell(platform: Platform) -> (AppShell, Arc<ScriptedSource>) {
        let camera = Arc::new(ScriptedSource::denied());
        let sources = CapabilitySet {
            camera: Arc::clone(&camera) as Arc<dyn CapabilitySource>,
            location: Arc::new(ScriptedSource::denied()),
            photos: Arc::new(ScriptedSource::denied()),
            messages: Arc::new(ScriptedSource::denied()),
        };
        let config = ReconcilerConfig {
            poll_interval_secs: 3600,
            foreground_settle_ms: 5,
            post_request_short_ms: 10,
            post_request_long_ms: 40,
        };
        let engine = Arc::new(ReconcileEngine::new(
            sources,
            Availability::resolve(platform),
            config,
        ));
        (AppShell::new(engine, DrawerConfig::default()), camera)
    }

    #[test]
    fn starts_on_the_permission_tab() {
        let (shell, _) = shell(Platform::Android);
        assert_eq!(shell.tab(), Tab::Permission);
        assert_eq!(shell.tab().header_title(), "Permissions");
    }

    #[test]
    fn help_dialog_copy_is_per_tab() {
        assert_eq!(Tab::Profile.help_title(), "Profile Help");
        assert_eq!(Tab::Permission.help_title(), "Permissions Help");
        assert_eq!(Tab::Email.help_title(), "Email Help");

        assert!(Tab::Profile.help_message().starts_with("Need help with your profile?"));
        assert!(
            Tab::Permission
                .help_message()
                .contains("• Camera: For scanning paper receipts")
        );
        assert!(
            Tab::Email
                .help_message()
                .contains("• We only scan for receipts, not personal emails")
        );
    }

    #[tokio::test]
    async fn denied_tap_requests_and_schedules_refresh() {
        let (shell, camera) = shell(Platform::Android);
        shell.engine().refresh().await;
        camera.set_request_result(PermissionStatus::granted()).await;

        let notice = shell.tap_permission(PermissionKind::Camera).await;
        assert_eq!(notice, None);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(shell.engine().snapshot().camera.granted);
    }

    #[tokio::test]
    async fn granted_messages_tap_shows_system_managed_notice() {
        let messages = Arc::new(ScriptedSource::granted());
        let engine = Arc::new(ReconcileEngine::new(
            CapabilitySet {
                camera: Arc::new(ScriptedSource::denied()),
                location: Arc::new(ScriptedSource::denied()),
                photos: Arc::new(ScriptedSource::denied()),
                messages: Arc::clone(&messages) as Arc<dyn CapabilitySource>,
            },
            Availability::resolve(Platform::Android),
            ReconcilerConfig::default(),
        ));
        engine.refresh().await;

        let shell = AppShell::new(engine, DrawerConfig::default());
        let notice = shell.tap_permission(PermissionKind::Messages).await;
        assert_eq!(notice, Some(Notice::SystemManaged));
        assert_eq!(messages.request_calls(), 0);
    }

    #[tokio::test]
    async fn messages_tap_on_ios_is_not_supported() {
        let (shell, _) = shell(Platform::Ios);
        let notice = shell.tap_permission(PermissionKind::Messages).await;
        assert_eq!(notice, Some(Notice::NotSupported(PermissionKind::Messages)));
    }

    #[tokio::test]
    async fn profile_picker_round_trips_through_the_drawer() {
        let (mut shell, _) = shell(Platform::Android);

        shell.open_profile_picker(ProfileField::Sector);
        shell.drawer_mut().advance(Duration::from_millis(300));
        assert_eq!(shell.drawer().state(), DrawerState::Open);
        assert_eq!(
            shell.drawer().title(),
            Some("What sector do you primarily operate in?")
        );

        assert!(shell.drawer_mut().select_option("Technology / Software"));
        shell.pump_profile_events();
        assert_eq!(
            shell.profile().value(ProfileField::Sector),
            "Technology / Software"
        );
    }
}
