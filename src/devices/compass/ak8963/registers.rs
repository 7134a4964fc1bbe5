//! AK8963 and MPU-9250 I2C Master Register Definitions
//!
//! Based on the AK8963 datasheet and the MPU-9250 Register Map
//! (RM-MPU-9250A-00 v1.6). Only the MPU-9250 registers needed to drive its
//! auxiliary I2C master are listed.

use bitflags::bitflags;

// ============================================================================
// AK8963 Magnetometer
// ============================================================================

/// AK8963 I2C address
pub const AK8963_ADDR: u8 = 0x0C;

/// Device ID register
pub const WIA: u8 = 0x00;

/// Status register 1 (data ready)
pub const ST1: u8 = 0x02;

/// Measurement data, low byte first
pub const HXL: u8 = 0x03;

/// Status register 2 (read to end a measurement)
pub const ST2: u8 = 0x09;

/// Control register 1 (mode)
pub const CNTL1: u8 = 0x0A;

/// Control register 2 (soft reset)
pub const CNTL2: u8 = 0x0B;

/// Sensitivity adjustment values, readable in fuse-ROM access mode
pub const ASAX: u8 = 0x10;

/// Expected WIA value
pub const WHO_AM_I_VALUE: u8 = 0x48;

/// Bytes fetched per measurement: HXL..HZH plus ST2
pub const MEASUREMENT_LEN: usize = 7;

/// CNTL1 power-down mode
pub const MODE_POWER_DOWN: u8 = 0x00;

/// CNTL1 single measurement mode
pub const MODE_SINGLE_MEASURE: u8 = 0x01;

/// CNTL1 fuse-ROM access mode
pub const MODE_FUSE_ROM: u8 = 0x0F;

/// CNTL2 soft reset
pub const CNTL2_SRST: u8 = 0x01;

bitflags! {
    /// ST1 bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status1: u8 {
        /// Data ready
        const DATA_READY = 0x01;
        /// Data overrun
        const DATA_OVERRUN = 0x02;
    }
}

bitflags! {
    /// ST2 error bits
    ///
    /// Mask values match the ones the flight-controller firmware has always
    /// used; the overflow mask spans bits 0 and 1.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status2: u8 {
        /// Data error
        const DATA_ERROR = 0x02;
        /// Magnetic sensor overflow
        const SENSOR_OVERFLOW = 0x03;
    }
}

impl Status2 {
    /// True when the measurement must be discarded
    pub fn is_fault(self) -> bool {
        self.intersects(Status2::DATA_ERROR | Status2::SENSOR_OVERFLOW)
    }
}

// ============================================================================
// MPU-9250 Auxiliary I2C Master
// ============================================================================

/// I2C master control
pub const I2C_MST_CTRL: u8 = 0x24;

/// I2C slave 0 address, register and control
pub const I2C_SLV0_ADDR: u8 = 0x25;
pub const I2C_SLV0_REG: u8 = 0x26;
pub const I2C_SLV0_CTRL: u8 = 0x27;

/// Interrupt pin / bypass enable configuration
pub const INT_PIN_CFG: u8 = 0x37;

/// First external sensor data register (slave 0 shadow buffer)
pub const EXT_SENS_DATA_00: u8 = 0x49;

/// I2C slave 0 data out
pub const I2C_SLV0_DO: u8 = 0x63;

/// User control
pub const USER_CTRL: u8 = 0x6A;

/// Read flag: register address MSB on SPI, slave address MSB on I2C_SLV0_ADDR
pub const READ_FLAG: u8 = 0x80;

/// I2C_SLV0_CTRL enable bit; the low nibble carries the transfer length
pub const I2C_SLV0_EN: u8 = 0x80;

/// INT_PIN_CFG: clear interrupt status on any read
pub const INT_ANYRD_2CLEAR: u8 = 0x10;

/// INT_PIN_CFG: I2C bypass enable
pub const BYPASS_EN: u8 = 0x02;

/// I2C_MST_CTRL: multi-master, 400 kHz
pub const I2C_MST_CTRL_400KHZ: u8 = 0x0D;

/// USER_CTRL: I2C master enable, I2C slave interface disabled (SPI only)
pub const USER_CTRL_I2C_MST_SPI_ONLY: u8 = 0x30;

/// Largest transfer the slave 0 length field can express
pub const SLV0_MAX_LEN: usize = 0x0F;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status2_clear_is_not_fault() {
        assert!(!Status2::from_bits_retain(0x00).is_fault());
        // 16-bit output flag (BITM) is not an error
        assert!(!Status2::from_bits_retain(0x10).is_fault());
    }

    #[test]
    fn test_status2_error_bits_are_fault() {
        assert!(Status2::from_bits_retain(0x02).is_fault());
        assert!(Status2::from_bits_retain(0x01).is_fault());
        assert!(Status2::from_bits_retain(0x03).is_fault());
    }

    #[test]
    fn test_status1_ready() {
        assert!(Status1::from_bits_retain(0x01).contains(Status1::DATA_READY));
        assert!(!Status1::from_bits_retain(0x02).contains(Status1::DATA_READY));
    }
}
