#![cfg_attr(not(any(test, feature = "mock")), no_std)]

//! pico_compass - AK8963 magnetometer support for Pico-class flight controllers
//!
//! This library provides the platform abstraction, the AK8963 driver with its
//! non-blocking MPU-9250 pass-through acquisition, and the compass parameters.
//!
//! ## Testing
//!
//! Unit tests run with a plain `cargo test`. The host integration tests in
//! `tests/` link against the mock platform and are only built with the
//! `mock` feature:
//!
//! ```text
//! cargo test --features mock
//! ```

// Platform abstraction layer (bus, timer, mocks)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core systems (logging)
pub mod core;

// Runtime parameters
pub mod parameters;
