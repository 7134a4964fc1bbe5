//! Device drivers
//!
//! This module contains device drivers that use platform abstraction traits,
//! so they run unchanged on target HALs and on the mock platform.
//!
//! ## Modules
//!
//! - `compass`: Magnetometer drivers (AK8963)
//! - `traits`: Device trait definitions (CompassSensor, etc.)

pub mod compass;
pub mod traits;
