//! AK8963 Configuration
//!
//! Driver timing and behaviour settings, plus the settings of the MPU-9250
//! pass-through transport.

use super::registers;

/// Settle time between arming a proxied read and its data being valid
pub const DEFAULT_SETTLE_DELAY_US: u32 = 8_000;

/// Driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ak8963Config {
    /// Minimum time between arming a queued read and fetching it (µs)
    pub settle_delay_us: u32,

    /// Wait after a soft reset before probing WIA (ms)
    pub reset_delay_ms: u32,

    /// Return the first transport error from `init()` instead of completing
    /// every step and reporting success
    pub strict_init: bool,
}

impl Default for Ak8963Config {
    fn default() -> Self {
        Self {
            settle_delay_us: DEFAULT_SETTLE_DELAY_US,
            reset_delay_ms: 4,
            strict_init: false,
        }
    }
}

/// MPU-9250 pass-through transport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassthroughConfig {
    /// 7-bit address of the magnetometer behind the I2C master
    pub slave_addr: u8,

    /// Wait after every SPI register write (µs)
    pub write_settle_us: u32,

    /// Wait between arming and fetching a blocking proxied read (ms)
    pub read_delay_ms: u32,
}

impl Default for PassthroughConfig {
    fn default() -> Self {
        Self {
            slave_addr: registers::AK8963_ADDR,
            write_settle_us: 10,
            read_delay_ms: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Ak8963Config::default();
        assert_eq!(config.settle_delay_us, 8_000);
        assert_eq!(config.reset_delay_ms, 4);
        assert!(!config.strict_init);
    }

    #[test]
    fn test_default_passthrough_config() {
        let config = PassthroughConfig::default();
        assert_eq!(config.slave_addr, 0x0C);
        assert_eq!(config.write_settle_us, 10);
        assert_eq!(config.read_delay_ms, 4);
    }
}
