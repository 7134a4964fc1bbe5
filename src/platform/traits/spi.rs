//! SPI interface trait
//!
//! This module defines the SPI device interface that platform implementations must provide.

use crate::platform::Result;

/// SPI device interface trait
///
/// An implementation represents one device on the bus. Every call is a single
/// transaction framed by chip select: CS is asserted before the first byte and
/// released after the last one.
///
/// # Safety Invariants
///
/// - SPI peripheral must be initialized before use
/// - Only one owner per SPI device instance
/// - No concurrent access to the same SPI bus from multiple contexts
pub trait SpiInterface {
    /// Write data in one transaction
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the transfer fails.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Write `write_data`, then clock in `read_buffer.len()` bytes, without
    /// releasing chip select in between
    ///
    /// This is the register read pattern: write the register address with the
    /// read flag, then read the register contents.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the transfer fails.
    fn write_read(&mut self, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()>;
}
