//! Configuration for the Tally shell.
//!
//! Resolution order:
//! 1. Built-in defaults
//! 2. Optional JSON config file (`tally.json`)

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Complete shell configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
    #[serde(default)]
    pub drawer: DrawerConfig,
}

/// Timing configuration for the permission reconciliation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    /// Interval between periodic refreshes (seconds).
    pub poll_interval_secs: u64,
    /// Settle delay after the app returns to the foreground (milliseconds).
    pub foreground_settle_ms: u64,
    /// First post-request refresh delay (milliseconds).
    pub post_request_short_ms: u64,
    /// Second post-request refresh delay (milliseconds). The OS permission
    /// store is eventually consistent shortly after a prompt is dismissed,
    /// so a single immediate refresh can read stale state.
    pub post_request_long_ms: u64,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            foreground_settle_ms: 100,
            post_request_short_ms: 400,
            post_request_long_ms: 1500,
        }
    }
}

impl ReconcilerConfig {
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub const fn foreground_settle(&self) -> Duration {
        Duration::from_millis(self.foreground_settle_ms)
    }

    pub const fn post_request_short(&self) -> Duration {
        Duration::from_millis(self.post_request_short_ms)
    }

    pub const fn post_request_long(&self) -> Duration {
        Duration::from_millis(self.post_request_long_ms)
    }
}

/// Animation and gesture configuration for the bottom drawer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawerConfig {
    /// Opening animation duration (milliseconds).
    pub open_duration_ms: u64,
    /// Closing animation duration (milliseconds); shorter than opening.
    pub close_duration_ms: u64,
    /// Drag distance that maps to a fully hidden drawer (points).
    pub drag_max_distance: f32,
    /// Drag distance past which a release commits to closing (points).
    pub dismiss_threshold: f32,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            open_duration_ms: 300,
            close_duration_ms: 250,
            drag_max_distance: 280.0,
            dismiss_threshold: 120.0,
        }
    }
}

impl DrawerConfig {
    pub const fn open_duration(&self) -> Duration {
        Duration::from_millis(self.open_duration_ms)
    }

    pub const fn close_duration(&self) -> Duration {
        Duration::from_millis(self.close_duration_ms)
    }
}

impl Config {
    /// Load configuration: defaults, then the optional file overlay.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load_file(path),
            Some(path) => Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            None => Ok(Self::default()),
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
