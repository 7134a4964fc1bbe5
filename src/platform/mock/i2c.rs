//! Mock I2C implementation for testing

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

#[derive(Debug, Default)]
struct MockI2cState {
    transactions: Vec<I2cTransaction>,
    read_data: VecDeque<u8>,
    nack: bool,
}

/// Mock I2C implementation
///
/// Records all transactions for test verification and allows
/// pre-programming expected read data. Clones share the same state, so a
/// test can keep a handle while the driver owns another.
#[derive(Debug, Clone, Default)]
pub struct MockI2c {
    state: Rc<RefCell<MockI2cState>>,
}

impl MockI2c {
    /// Create a new mock I2C
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<I2cTransaction> {
        self.state.borrow().transactions.clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&self) {
        self.state.borrow_mut().transactions.clear();
    }

    /// Append data returned by subsequent reads
    pub fn push_read_data(&self, data: &[u8]) {
        self.state.borrow_mut().read_data.extend(data.iter().copied());
    }

    /// Make every transaction fail with a NACK while `nack` is set
    ///
    /// Failed transactions are still recorded.
    pub fn set_nack(&self, nack: bool) {
        self.state.borrow_mut().nack = nack;
    }

    fn result(state: &MockI2cState) -> Result<()> {
        if state.nack {
            Err(PlatformError::I2c(I2cError::Nack))
        } else {
            Ok(())
        }
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.transactions.push(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        });
        Self::result(&state)
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.transactions.push(I2cTransaction::WriteRead {
            addr,
            write_data: write_data.to_vec(),
            read_len: read_buffer.len(),
        });
        Self::result(&state)?;

        for byte in read_buffer.iter_mut() {
            *byte = state.read_data.pop_front().unwrap_or(0);
        }
        Ok(())
    }
}
