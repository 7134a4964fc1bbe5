//! AK8963 Magnetometer Driver
//!
//! Driver for the AKM AK8963 3-axis magnetometer, either on its own I2C bus
//! or behind the auxiliary I2C master of an MPU-9250 on SPI.
//!
//! # Features
//!
//! - Detection by soft reset and device ID check
//! - Per-axis gain from the fuse-ROM sensitivity adjustment bytes
//! - Blocking reads on a direct bus
//! - Non-blocking queued reads through the MPU-9250 shadow registers
//!
//! # Usage
//!
//! ```ignore
//! use pico_compass::devices::compass::ak8963::{Ak8963, Ak8963Config, Mpu9250Passthrough};
//! use pico_compass::devices::traits::CompassSensor;
//!
//! let bus = Mpu9250Passthrough::new(spi, timer);
//! let mut compass = Ak8963::detect(bus, timer, Ak8963Config::default())?;
//! compass.init()?;
//!
//! loop {
//!     if let Some(sample) = compass.read() {
//!         // use sample
//!     }
//! }
//! ```

mod acquisition;
mod bus;
mod config;
mod driver;
mod gain;
mod queued_read;
pub mod registers;

pub use acquisition::{decode_measurement, Acquisition, AcquisitionState};
pub use bus::{DirectI2c, MagBus, Mpu9250Passthrough, QueuedMagBus};
pub use config::{Ak8963Config, PassthroughConfig, DEFAULT_SETTLE_DELAY_US};
pub use driver::Ak8963;
pub use gain::{decode_raw, CalibrationGain};
pub use queued_read::QueuedRead;
