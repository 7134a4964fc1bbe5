//! Platform abstraction layer
//!
//! This module provides the bus and timer abstraction that drivers are written
//! against. Concrete HALs plug in through the `embedded-hal` adapters; host
//! tests use the mock platform.

pub mod error;
pub mod hal;
pub mod traits;

#[cfg(feature = "embassy")]
pub mod time;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use hal::{HalI2c, HalSpi};
pub use traits::{I2cInterface, SpiInterface, TimerInterface};

#[cfg(feature = "embassy")]
pub use time::EmbassyTimer;
