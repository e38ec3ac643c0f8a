//! Tally Capability Library
//!
//! The seam between the app shell and platform permission subsystems:
//! - [`CapabilitySource`] trait (query + request, per kind)
//! - Push adapter wrapping event-driven subsystems (camera) behind the
//!   same pull interface
//! - Per-kind availability resolved once at startup (SMS is Android-only)
//! - A scriptable source for tests and the headless demo binary

pub mod availability;
pub mod error;
pub mod push;
pub mod source;
pub mod testing;

pub use availability::{Availability, Platform};
pub use error::CapabilityError;
pub use push::{PushHandle, PushSource};
pub use source::CapabilitySource;
