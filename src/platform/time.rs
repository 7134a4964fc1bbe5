//! Embassy-based timer implementation.
//!
//! This module provides the `EmbassyTimer` implementation of the
//! `TimerInterface` trait using Embassy's time driver.

use crate::platform::{traits::TimerInterface, Result};
use embassy_time::{block_for, Duration, Instant};

/// Embassy-based timer using the Embassy time driver.
///
/// Delays busy-wait on `embassy_time::block_for`, so they are safe to use
/// from the synchronous driver code that runs inside the control loop.
///
/// # Example
///
/// ```ignore
/// use pico_compass::platform::{EmbassyTimer, TimerInterface};
///
/// let timer = EmbassyTimer;
/// let now = timer.now_us();
/// ```
#[derive(Clone, Copy, Default)]
pub struct EmbassyTimer;

impl TimerInterface for EmbassyTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        block_for(Duration::from_micros(u64::from(us)));
        Ok(())
    }

    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }

    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
