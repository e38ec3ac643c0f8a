//! Tally App Shell Library
//!
//! Core functionality for the Tally shell:
//! - Permission reconciliation engine (snapshot merging, flicker guard)
//! - Delayed-task scheduler for debounced refreshes
//! - Bottom-drawer state machine shared across screens
//! - Screen controllers for the Profile, Permissions, and Email tabs

pub mod drawer;
pub mod reconcile;
pub mod screens;
pub mod shell;
