//! Mock SPI implementation for testing

use crate::platform::{
    error::{PlatformError, SpiError},
    traits::SpiInterface,
    Result,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

/// SPI transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiTransaction {
    /// Write only
    Write { data: Vec<u8> },
    /// Write followed by read under one chip select
    WriteRead { write_data: Vec<u8>, read_len: usize },
}

#[derive(Debug, Default)]
struct MockSpiState {
    transactions: Vec<SpiTransaction>,
    read_data: VecDeque<u8>,
    fail_writes: bool,
    fail_reads: bool,
}

/// Mock SPI device
///
/// Records all transactions for test verification and allows
/// pre-programming expected read data. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockSpi {
    state: Rc<RefCell<MockSpiState>>,
}

impl MockSpi {
    /// Create a new mock SPI device
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<SpiTransaction> {
        self.state.borrow().transactions.clone()
    }

    /// Payloads of all write-only transactions, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .transactions
            .iter()
            .filter_map(|t| match t {
                SpiTransaction::Write { data } => Some(data.clone()),
                SpiTransaction::WriteRead { .. } => None,
            })
            .collect()
    }

    /// Clear transaction log
    pub fn clear_transactions(&self) {
        self.state.borrow_mut().transactions.clear();
    }

    /// Append data returned by subsequent reads
    pub fn push_read_data(&self, data: &[u8]) {
        self.state.borrow_mut().read_data.extend(data.iter().copied());
    }

    /// Make write-only transactions fail while set
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }

    /// Make write-read transactions fail while set
    pub fn set_fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }
}

impl SpiInterface for MockSpi {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.transactions.push(SpiTransaction::Write {
            data: data.to_vec(),
        });
        if state.fail_writes {
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }
        Ok(())
    }

    fn write_read(&mut self, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.transactions.push(SpiTransaction::WriteRead {
            write_data: write_data.to_vec(),
            read_len: read_buffer.len(),
        });
        if state.fail_reads {
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }

        for byte in read_buffer.iter_mut() {
            *byte = state.read_data.pop_front().unwrap_or(0);
        }
        Ok(())
    }
}
