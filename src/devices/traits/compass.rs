//! Compass Sensor Trait and Data Types
//!
//! Device-independent interface for magnetometers polled from the control loop.
//!
//! ## Usage
//!
//! ```ignore
//! use pico_compass::devices::traits::CompassSensor;
//!
//! fn control_loop<C: CompassSensor>(compass: &mut C) {
//!     compass.init()?;
//!     loop {
//!         if let Some(sample) = compass.read() {
//!             // Feed sample into the heading estimator
//!         }
//!     }
//! }
//! ```

use crate::platform::PlatformError;
use core::fmt;
use nalgebra::Vector3;

/// Compass error types
///
/// `TransportNack`, `DataNotReady` and `SensorFault` are ordinary polling
/// outcomes: they never escalate, the next poll simply starts a new cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompassError {
    /// Bus did not acknowledge or the transfer failed
    TransportNack(PlatformError),

    /// No fresh measurement yet
    DataNotReady,

    /// Measurement flagged as invalid by the sensor (data error or overflow)
    SensorFault,

    /// A queued read is already outstanding
    ReadPending,

    /// Device answered with an unexpected ID
    NotDetected {
        /// Value read from the ID register
        who_am_i: u8,
    },
}

impl From<PlatformError> for CompassError {
    fn from(error: PlatformError) -> Self {
        CompassError::TransportNack(error)
    }
}

impl fmt::Display for CompassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompassError::TransportNack(e) => write!(f, "transport failure: {}", e),
            CompassError::DataNotReady => write!(f, "data not ready"),
            CompassError::SensorFault => write!(f, "sensor reported data error or overflow"),
            CompassError::ReadPending => write!(f, "queued read already pending"),
            CompassError::NotDetected { who_am_i } => {
                write!(f, "unexpected device id {:#04x}", who_am_i)
            }
        }
    }
}

/// Calibrated magnetometer sample
///
/// Values are raw counts scaled by the per-axis gain, in sensor axes with the
/// sign convention of the flight controller (negated raw).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagSample {
    /// X axis
    pub x: i32,
    /// Y axis
    pub y: i32,
    /// Z axis
    pub z: i32,
}

impl MagSample {
    /// Sample as a float vector
    pub fn as_vector(&self) -> Vector3<f32> {
        Vector3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Device-independent compass interface
///
/// `read()` is called at control-loop rate and must return quickly; it
/// reports `None` until a fresh calibrated sample is available.
pub trait CompassSensor {
    /// Prepare the sensor and arm the first measurement
    fn init(&mut self) -> Result<(), CompassError>;

    /// Poll for a fresh calibrated sample
    fn read(&mut self) -> Option<MagSample>;

    /// Per-axis scale factors applied to raw counts
    fn gain(&self) -> [f32; 3];
}
