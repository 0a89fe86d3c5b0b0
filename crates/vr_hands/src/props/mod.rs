//! Props picked up and dropped by holding hand shapes

mod controller;

pub use controller::{PropController, PropError, PropGeometry, PropState, ReleasePolicy};
