//! Shell-level scenarios: tabs, drawer, and permission taps working together.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use tally_capability::testing::ScriptedSource;
use tally_capability::{Availability, CapabilitySource, Platform};
use tally_core::config::{DrawerConfig, ReconcilerConfig};
use tally_core::{PermissionKind, PermissionStatus};
use tally_shell::drawer::DrawerState;
use tally_shell::reconcile::{CapabilitySet, ReconcileEngine};
use tally_shell::screens::permissions::{self, Notice};
use tally_shell::screens::profile::ProfileField;
use tally_shell::shell::{AppShell, Tab};

struct Harness {
    shell: AppShell,
    camera: Arc<ScriptedSource>,
    photos: Arc<ScriptedSource>,
    messages: Arc<ScriptedSource>,
}

fn harness(platform: Platform) -> Harness {
    let camera = Arc::new(ScriptedSource::denied());
    let photos = Arc::new(ScriptedSource::denied());
    let messages = Arc::new(ScriptedSource::denied());

    let sources = CapabilitySet {
        camera: Arc::clone(&camera) as Arc<dyn CapabilitySource>,
        location: Arc::new(ScriptedSource::denied()),
        photos: Arc::clone(&photos) as Arc<dyn CapabilitySource>,
        messages: Arc::clone(&messages) as Arc<dyn CapabilitySource>,
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
    Harness {
        shell: AppShell::new(engine, DrawerConfig::default()),
        camera,
        photos,
        messages,
    }
}

#[tokio::test]
async fn tab_switching_keeps_screen_state() {
    let mut h = harness(Platform::Android);
    assert_eq!(h.shell.tab(), Tab::Permission);

    h.shell.open_profile_picker(ProfileField::Achievement);
    h.shell.drawer_mut().advance(Duration::from_millis(300));
    assert!(h.shell.drawer_mut().select_option("Prepare for tax season"));
    h.shell.pump_profile_events();

    h.shell.select_tab(Tab::Email);
    assert_eq!(h.shell.tab().header_title(), "Emails");
    assert_eq!(h.shell.tab().help_title(), "Email Help");
    h.shell.select_tab(Tab::Profile);
    assert_eq!(
        h.shell.profile().value(ProfileField::Achievement),
        "Prepare for tax season"
    );
}

#[tokio::test]
async fn camera_tap_flow_grants_and_row_updates() {
    let h = harness(Platform::Android);
    h.shell.engine().refresh().await;
    h.camera.set_request_result(PermissionStatus::granted()).await;

    let rows = permissions::rows(&h.shell.engine().snapshot());
    assert!(!rows[0].status.granted);

    let notice = h.shell.tap_permission(PermissionKind::Camera).await;
    assert_eq!(notice, None);

    tokio::time::sleep(Duration::from_millis(100)).await;
    let rows = permissions::rows(&h.shell.engine().snapshot());
    assert!(rows[0].status.granted);
    assert_eq!(rows[0].name, "Camera");

    // A second tap on the granted row is inert.
    let notice = h.shell.tap_permission(PermissionKind::Camera).await;
    assert_eq!(notice, None);
    assert_eq!(h.camera.request_calls(), 1);
}

#[tokio::test]
async fn permanently_denied_photos_tap_points_to_settings() {
    let h = harness(Platform::Android);
    h.photos
        .set_status(PermissionStatus::permanently_denied())
        .await;
    h.shell.engine().refresh().await;

    let notice = h.shell.tap_permission(PermissionKind::Photos).await;
    assert_eq!(notice, Some(Notice::OpenSettings(PermissionKind::Photos)));
    assert_eq!(h.photos.request_calls(), 0);
}

#[tokio::test]
async fn granted_messages_tap_never_reprompts() {
    let h = harness(Platform::Android);
    h.messages.set_status(PermissionStatus::granted()).await;
    h.shell.engine().refresh().await;

    let notice = h.shell.tap_permission(PermissionKind::Messages).await;
    assert_eq!(notice, Some(Notice::SystemManaged));
    assert_eq!(h.messages.request_calls(), 0);
}

#[tokio::test]
async fn foreground_return_picks_up_settings_changes() {
    let h = harness(Platform::Android);
    h.shell.engine().refresh().await;

    // User flips the toggle in system settings while backgrounded.
    h.photos.set_status(PermissionStatus::granted()).await;
    h.shell.on_foreground().await;

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(h.shell.engine().snapshot().photos.granted);
}

#[tokio::test]
async fn drag_dismissal_closes_the_picker_without_selecting() {
    let mut h = harness(Platform::Android);
    h.shell.open_profile_picker(ProfileField::Sector);
    h.shell.drawer_mut().advance(Duration::from_millis(300));
    assert_eq!(h.shell.drawer().state(), DrawerState::Open);

    h.shell.drawer_mut().drag_update(200.0);
    h.shell.drawer_mut().drag_release(200.0);
    h.shell.drawer_mut().advance(Duration::from_millis(250));
    assert_eq!(h.shell.drawer().state(), DrawerState::Closed);

    h.shell.pump_profile_events();
    assert_eq!(
        h.shell.profile().value(ProfileField::Sector),
        "Real Estate (Agents, Property Management)"
    );
}
