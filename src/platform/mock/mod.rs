//! Mock platform implementation for host testing
//!
//! Every mock is a cheap handle over shared state: clone it before handing it
//! to a driver and keep the clone to script responses and inspect traffic.

pub mod i2c;
pub mod spi;
pub mod timer;

pub use i2c::{I2cTransaction, MockI2c};
pub use spi::{MockSpi, SpiTransaction};
pub use timer::MockTimer;
