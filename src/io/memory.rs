//! In-memory storage
//!
//! Keeps the last saved mapping in memory. Used as a test double for the file
//! backends and to count how often the store persists.

use crate::core::traits::StorageBackend;
use crate::types::{AccountRecords, BankError};

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: AccountRecords,
    save_count: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously persisted records
    pub fn with_records(records: AccountRecords) -> Self {
        Self {
            records,
            save_count: 0,
        }
    }

    /// Records as of the last save
    pub fn records(&self) -> &AccountRecords {
        &self.records
    }

    /// Number of saves since construction
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<AccountRecords, BankError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &AccountRecords) -> Result<(), BankError> {
        self.records = records.clone();
        self.save_count += 1;
        Ok(())
    }
}
