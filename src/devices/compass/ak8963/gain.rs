//! Per-axis sensitivity gain
//!
//! The AK8963 ships with one factory trim byte per axis (ASAX..ASAZ). The
//! flight controller turns them into a scale factor that also folds in the
//! raw-count to milligauss conversion.

use crate::devices::traits::MagSample;

/// Overall scale applied on top of the trim adjustment
const GAIN_SCALE: f32 = 30.0;

/// Per-axis calibration gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationGain {
    factors: [f32; 3],
}

impl Default for CalibrationGain {
    /// Unity gain, used until `init()` has read the trim bytes
    fn default() -> Self {
        Self { factors: [1.0; 3] }
    }
}

impl CalibrationGain {
    /// Compute gains from the fuse-ROM trim bytes
    ///
    /// Trim bytes are taken as signed 8-bit values, so 0x00 maps to half
    /// scale and 0x80 to zero.
    pub fn from_trim(trim: [u8; 3]) -> Self {
        let factors = trim.map(|t| (((t as i8) as f32 - 128.0) / 256.0 + 1.0) * GAIN_SCALE);
        Self { factors }
    }

    /// Use explicit per-axis factors
    pub fn from_factors(factors: [f32; 3]) -> Self {
        Self { factors }
    }

    /// Per-axis factors
    pub fn factors(&self) -> [f32; 3] {
        self.factors
    }

    /// Negate and scale raw counts, truncating toward zero
    pub fn apply(&self, raw: [i16; 3]) -> MagSample {
        let scale = |axis: usize| (-(raw[axis] as f32) * self.factors[axis]) as i32;
        MagSample {
            x: scale(0),
            y: scale(1),
            z: scale(2),
        }
    }
}

/// Decode the little-endian axis pairs of a `HXL..HZH` block
pub fn decode_raw(data: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_le_bytes([data[0], data[1]]),
        i16::from_le_bytes([data[2], data[3]]),
        i16::from_le_bytes([data[4], data[5]]),
    ]
}
