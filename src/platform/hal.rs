//! embedded-hal adapters
//!
//! Wraps any `embedded-hal` 1.0 I2C bus or SPI device so it can be handed to
//! drivers written against the platform traits. HAL-specific errors are mapped
//! to [`PlatformError`] through their `ErrorKind`.

use crate::platform::{
    error::{I2cError, PlatformError, SpiError},
    traits::{I2cInterface, SpiInterface},
    Result,
};
use embedded_hal::i2c::{self, Error as _};
use embedded_hal::spi::{self, Error as _, Operation};

fn map_i2c_error(kind: i2c::ErrorKind) -> PlatformError {
    let error = match kind {
        i2c::ErrorKind::NoAcknowledge(_) => I2cError::Nack,
        i2c::ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
        _ => I2cError::BusError,
    };
    PlatformError::I2c(error)
}

fn map_spi_error(kind: spi::ErrorKind) -> PlatformError {
    let error = match kind {
        spi::ErrorKind::Overrun => SpiError::Overrun,
        spi::ErrorKind::ModeFault => SpiError::ModeFault,
        _ => SpiError::TransferFailed,
    };
    PlatformError::Spi(error)
}

/// I2C bus adapter for `embedded_hal::i2c::I2c` implementations
pub struct HalI2c<I> {
    i2c: I,
}

impl<I: i2c::I2c> HalI2c<I> {
    /// Wrap a HAL I2C bus
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the wrapped bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: i2c::I2c> I2cInterface for HalI2c<I> {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.i2c
            .write(addr, data)
            .map_err(|e| map_i2c_error(e.kind()))
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.i2c
            .write_read(addr, write_data, read_buffer)
            .map_err(|e| map_i2c_error(e.kind()))
    }
}

/// SPI device adapter for `embedded_hal::spi::SpiDevice` implementations
///
/// The `SpiDevice` owns chip select, so each call maps to one HAL transaction.
pub struct HalSpi<S> {
    spi: S,
}

impl<S: spi::SpiDevice> HalSpi<S> {
    /// Wrap a HAL SPI device
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    /// Release the wrapped device
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: spi::SpiDevice> SpiInterface for HalSpi<S> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.spi.write(data).map_err(|e| map_spi_error(e.kind()))
    }

    fn write_read(&mut self, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.spi
            .transaction(&mut [Operation::Write(write_data), Operation::Read(read_buffer)])
            .map_err(|e| map_spi_error(e.kind()))
    }
}
