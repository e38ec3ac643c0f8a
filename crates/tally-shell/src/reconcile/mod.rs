//! Permission status reconciliation.
//!
//! The engine polls all capability sources, merges their results into a
//! single [`tally_core::PermissionSnapshot`], and suppresses flicker from
//! subsystems that report transient state after a permission request.

mod engine;
mod memo;
mod scheduler;

pub use engine::{CapabilitySet, ReconcileEngine, RequestOutcome};
pub use memo::StabilityMemo;
pub use scheduler::TaskScheduler;
