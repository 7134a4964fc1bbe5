//! Outstanding proxied read
//!
//! Tracks the single read armed on a [`QueuedMagBus`]: whether it is still
//! pending, how many bytes it covers and when it was issued, so that the data
//! is only collected once the MPU has had time to finish the transfer.

use super::bus::QueuedMagBus;
use crate::devices::traits::CompassError;
use crate::platform::TimerInterface;

/// Single outstanding queued read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedRead {
    pending: bool,
    len: u8,
    issued_at_us: u64,
    settle_us: u32,
}

impl QueuedRead {
    /// Empty tracker with the given settle time
    pub const fn new(settle_us: u32) -> Self {
        Self {
            pending: false,
            len: 0,
            issued_at_us: 0,
            settle_us,
        }
    }

    /// A read is armed and not yet collected
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Length of the last armed read
    pub fn requested_len(&self) -> u8 {
        self.len
    }

    /// Timestamp of the last armed read (µs)
    pub fn issued_at_us(&self) -> u64 {
        self.issued_at_us
    }

    /// Arm a read of `len` registers from `reg`
    ///
    /// Fails with `ReadPending`, without touching the bus, while another read
    /// is outstanding. Nothing is recorded if arming fails.
    pub fn start<B, T>(
        &mut self,
        bus: &mut B,
        timer: &T,
        reg: u8,
        len: u8,
    ) -> Result<(), CompassError>
    where
        B: QueuedMagBus,
        T: TimerInterface,
    {
        if self.pending {
            return Err(CompassError::ReadPending);
        }

        bus.arm_read(reg, len)?;

        self.pending = true;
        self.len = len;
        self.issued_at_us = timer.now_us();
        Ok(())
    }

    /// Microseconds until the armed read has settled, 0 when idle
    pub fn time_remaining_us<T: TimerInterface>(&self, timer: &T) -> u32 {
        if !self.pending {
            return 0;
        }
        let elapsed = timer.now_us().saturating_sub(self.issued_at_us);
        u64::from(self.settle_us)
            .saturating_sub(elapsed)
            .try_into()
            .unwrap_or(u32::MAX)
    }

    /// Wait out the remaining settle time, then collect the data into `buf`
    ///
    /// The read is no longer pending afterwards, whether or not the wait or
    /// the fetch succeeded. At most `buf.len()` bytes are fetched.
    pub fn complete<B, T>(
        &mut self,
        bus: &mut B,
        timer: &mut T,
        buf: &mut [u8],
    ) -> Result<(), CompassError>
    where
        B: QueuedMagBus,
        T: TimerInterface,
    {
        let remaining = self.time_remaining_us(timer);
        self.pending = false;
        if remaining > 0 {
            timer.delay_us(remaining)?;
        }

        let len = usize::from(self.len).min(buf.len());
        bus.fetch_armed(&mut buf[..len])?;
        Ok(())
    }

    /// Forget an outstanding read
    pub fn clear(&mut self) {
        self.pending = false;
    }
}
