//! Screen controllers for the three tabs.
//!
//! These are thin view models: the Permissions screen is a pure projection
//! of the snapshot, the Profile screen holds three locally selected
//! fields, and the Email screen is static placeholder content.

pub mod email;
pub mod permissions;
pub mod profile;
