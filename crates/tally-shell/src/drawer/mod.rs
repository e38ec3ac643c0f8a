//! Shared bottom-drawer picker.
//!
//! One drawer instance is shared by every screen that needs a
//! "pick one of N options" selector; whichever screen opens it supplies a
//! [`DrawerRequest`] with the title, options, and selection callback.

mod controller;

pub use controller::{DrawerController, DrawerRequest, DrawerState};
