//! Magnetometer bus transports
//!
//! The AK8963 is reached either directly on an I2C bus ([`DirectI2c`]) or
//! through the auxiliary I2C master of an MPU-9250 that is itself on SPI
//! ([`Mpu9250Passthrough`]). In the second case the MPU clocks the transfer
//! out on its own and leaves the result in its `EXT_SENS_DATA` shadow
//! registers, which is what makes a non-blocking read possible.

use super::config::PassthroughConfig;
use super::registers::*;
use crate::platform::{
    error::PlatformError, I2cInterface, Result, SpiInterface, TimerInterface,
};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};

/// Register access to the magnetometer
pub trait MagBus {
    /// Write one magnetometer register
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()>;

    /// Read `buf.len()` consecutive magnetometer registers starting at `reg`
    ///
    /// Blocks until the data is available.
    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<()>;

    /// Bring the transport up before the first access
    fn prepare(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Transport that can start a read now and collect its data later
pub trait QueuedMagBus: MagBus {
    /// Start a read of `len` registers from `reg`
    ///
    /// Returns as soon as the transfer is armed.
    fn arm_read(&mut self, reg: u8, len: u8) -> Result<()>;

    /// Collect the data of the last armed read
    ///
    /// The caller is responsible for waiting until the transfer has settled.
    fn fetch_armed(&mut self, buf: &mut [u8]) -> Result<()>;
}

// ============================================================================
// Direct I2C
// ============================================================================

/// AK8963 on a plain I2C bus
pub struct DirectI2c<I> {
    i2c: I,
    addr: u8,
}

impl<I: I2cInterface> DirectI2c<I> {
    /// Use the default AK8963 address (0x0C)
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, AK8963_ADDR)
    }

    /// Use an explicit 7-bit address
    pub fn with_address(i2c: I, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Release the wrapped bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2cInterface> MagBus for DirectI2c<I> {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.i2c.write(self.addr, &[reg, value])
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<()> {
        self.i2c.write_read(self.addr, &[reg], buf)
    }
}

// ============================================================================
// MPU-9250 pass-through over SPI
// ============================================================================

/// AK8963 behind the I2C master of an MPU-9250 on SPI
///
/// Every MPU register write is followed by a short settle delay. Fetches from
/// the shadow registers run inside the `M` lock so that no other context can
/// reprogram slave 0 halfway through.
pub struct Mpu9250Passthrough<S, T, M: RawMutex = CriticalSectionRawMutex> {
    spi: S,
    timer: T,
    lock: M,
    config: PassthroughConfig,
}

impl<S: SpiInterface, T: TimerInterface> Mpu9250Passthrough<S, T> {
    /// Pass-through with default settings and a critical-section lock
    pub fn new(spi: S, timer: T) -> Self {
        Self::with_config(spi, timer, PassthroughConfig::default())
    }
}

impl<S: SpiInterface, T: TimerInterface, M: RawMutex> Mpu9250Passthrough<S, T, M> {
    /// Pass-through with explicit settings
    pub fn with_config(spi: S, timer: T, config: PassthroughConfig) -> Self {
        Self {
            spi,
            timer,
            lock: M::INIT,
            config,
        }
    }

    /// Transport settings
    pub fn config(&self) -> &PassthroughConfig {
        &self.config
    }

    /// Release the SPI device and timer
    pub fn release(self) -> (S, T) {
        (self.spi, self.timer)
    }

    /// Write one MPU register
    fn write_mpu(&mut self, reg: u8, value: u8) -> Result<()> {
        self.spi.write(&[reg, value])?;
        self.timer.delay_us(self.config.write_settle_us)
    }
}

impl<S: SpiInterface, T: TimerInterface, M: RawMutex> MagBus for Mpu9250Passthrough<S, T, M> {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.write_mpu(I2C_SLV0_ADDR, self.config.slave_addr)?;
        self.write_mpu(I2C_SLV0_REG, reg)?;
        self.write_mpu(I2C_SLV0_DO, value)?;
        self.write_mpu(I2C_SLV0_CTRL, I2C_SLV0_EN | 0x01)
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<()> {
        let len = u8::try_from(buf.len()).map_err(|_| PlatformError::InvalidConfig)?;
        self.arm_read(reg, len)?;
        self.timer.delay_ms(self.config.read_delay_ms)?;
        self.fetch_armed(buf)
    }

    /// Configure the MPU as I2C master of its auxiliary bus
    fn prepare(&mut self) -> Result<()> {
        self.write_mpu(INT_PIN_CFG, INT_ANYRD_2CLEAR | BYPASS_EN)?;
        self.write_mpu(I2C_MST_CTRL, I2C_MST_CTRL_400KHZ)?;
        self.write_mpu(USER_CTRL, USER_CTRL_I2C_MST_SPI_ONLY)
    }
}

impl<S: SpiInterface, T: TimerInterface, M: RawMutex> QueuedMagBus
    for Mpu9250Passthrough<S, T, M>
{
    fn arm_read(&mut self, reg: u8, len: u8) -> Result<()> {
        if len == 0 || usize::from(len) > SLV0_MAX_LEN {
            return Err(PlatformError::InvalidConfig);
        }
        self.write_mpu(I2C_SLV0_ADDR, self.config.slave_addr | READ_FLAG)?;
        self.write_mpu(I2C_SLV0_REG, reg)?;
        self.write_mpu(I2C_SLV0_CTRL, len | I2C_SLV0_EN)
    }

    fn fetch_armed(&mut self, buf: &mut [u8]) -> Result<()> {
        let spi = &mut self.spi;
        self.lock
            .lock(|| spi.write_read(&[EXT_SENS_DATA_00 | READ_FLAG], buf))
    }
}
