//! Tally Shell
//!
//! Headless demo binary: wires scripted capability sources into the
//! reconciliation engine, starts the poll schedule, and runs until
//! interrupted. Real platform providers plug in through the same
//! `CapabilitySource` seam.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use tally_capability::testing::ScriptedSource;
use tally_capability::{Availability, Platform, PushSource};
use tally_core::config::Config;
use tally_shell::reconcile::{CapabilitySet, ReconcileEngine};
use tally_shell::shell::AppShell;

#[derive(Parser, Debug)]
#[command(name = "tally-shell")]
#[command(version, about = "Tally app shell - headless permission reconciler")]
struct Args {
    /// Host platform to resolve capability availability for.
    #[arg(
        long,
        default_value = "android",
        env = "TALLY_PLATFORM",
        value_parser = ["android", "ios", "other"]
    )]
    platform: String,

    /// Optional JSON config file path.
    #[arg(long, env = "TALLY_CONFIG")]
    config: Option<PathBuf>,

    /// Log level filter (e.g. "info", "debug", "warn").
    #[arg(long, default_value = "info", env = "TALLY_LOG_LEVEL")]
    log_level: String,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long, env = "TALLY_LOG_JSON")]
    log_json: bool,
}

/// `~/.config/tally/tally.json`, when it exists.
fn default_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("tally").join("tally.json");
    path.exists().then_some(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tally_core::tracing_init::init_tracing(&args.log_level, args.log_json);

    let platform = match args.platform.as_str() {
        "ios" => Platform::Ios,
        "other" => Platform::Other,
        _ => Platform::Android,
    };
    let config = match &args.config {
        Some(path) => Config::load(Some(path))?,
        None => Config::load(default_config_path().as_deref())?,
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = platform.as_str(),
        poll_interval_secs = config.reconciler.poll_interval_secs,
        "Starting tally-shell"
    );

    // The camera subsystem is event-driven; the push adapter turns its
    // subscription into the same pull interface as the other sources.
    let (camera, camera_events) = PushSource::subscribe(ScriptedSource::denied());
    let sources = CapabilitySet {
        camera: Arc::new(camera),
        location: Arc::new(ScriptedSource::denied()),
        photos: Arc::new(ScriptedSource::denied()),
        messages: Arc::new(ScriptedSource::denied()),
    };

    let engine = Arc::new(ReconcileEngine::new(
        sources,
        Availability::resolve(platform),
        config.reconciler,
    ));
    let shell = AppShell::new(Arc::clone(&engine), config.drawer);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let poll_handle = engine.spawn_poll_task(shutdown_rx);

    let mut snapshot_rx = engine.subscribe();
    let watch_handle = tokio::spawn(async move {
        while snapshot_rx.changed().await.is_ok() {
            let snapshot = *snapshot_rx.borrow_and_update();
            info!(
                camera = snapshot.camera.granted,
                location = snapshot.location.granted,
                photos = snapshot.photos.granted,
                messages = snapshot.messages.granted,
                "Snapshot changed"
            );
        }
    });

    // Simulate the camera subsystem granting access a few seconds in; the
    // next poll pass picks it up through the push adapter.
    let push_handle = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            camera_events
                .publish(tally_core::PermissionStatus::granted())
                .await;
            engine.refresh().await;
        }
    });

    info!(tab = shell.tab().header_title(), "Shell ready");

    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl+C, shutting down");

    shutdown_tx.send(true)?;
    poll_handle.await?;
    watch_handle.abort();
    push_handle.abort();

    Ok(())
}
