//! Shared tracing/logging initialization.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directives covering the tally crates at one level, used when
/// `RUST_LOG` is not set.
pub fn default_filter(log_level: &str) -> String {
    format!("tally_core={log_level},tally_capability={log_level},tally_shell={log_level}")
}

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. When `log_json` is set,
/// emit structured JSON log lines instead of the human-readable format.
pub fn init_tracing(log_level: &str, log_json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));
    if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
