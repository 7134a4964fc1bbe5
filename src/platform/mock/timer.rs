//! Mock Timer implementation for testing

use crate::platform::{
    error::{PlatformError, TimerError},
    traits::TimerInterface,
    Result,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

/// Mock Timer implementation
///
/// Uses simulated time: delays advance the clock instead of sleeping, and
/// tests move time forward with [`MockTimer::advance`]. Clones share the same
/// clock and delay log.
#[derive(Debug, Clone, Default)]
pub struct MockTimer {
    now_us: Rc<Cell<u64>>,
    delays_us: Rc<RefCell<Vec<u32>>>,
    fail_delays: Rc<Cell<bool>>,
}

impl MockTimer {
    /// Create a new mock timer starting at time 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance simulated time without recording a delay
    pub fn advance(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }

    /// Every delay requested so far, in microseconds
    pub fn delays(&self) -> Vec<u32> {
        self.delays_us.borrow().clone()
    }

    /// Forget recorded delays
    pub fn clear_delays(&self) {
        self.delays_us.borrow_mut().clear();
    }

    /// Make delays fail, without advancing time, while set
    pub fn set_fail_delays(&self, fail: bool) {
        self.fail_delays.set(fail);
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        if self.fail_delays.get() {
            return Err(PlatformError::Timer(TimerError::InvalidDuration));
        }
        self.delays_us.borrow_mut().push(us);
        self.advance(u64::from(us));
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}
