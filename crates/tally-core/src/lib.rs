//! Tally Core Library
//!
//! Shared functionality for Tally components:
//! - Permission kind/status/snapshot value types
//! - Configuration resolution and defaults
//! - Common error types

pub mod config;
pub mod error;
pub mod permissions;
pub mod tracing_init;

pub use config::Config;
pub use error::{Error, Result};
pub use permissions::{PermissionKind, PermissionSnapshot, PermissionStatus};
