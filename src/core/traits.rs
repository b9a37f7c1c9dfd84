//! Core traits for account persistence
//!
//! This module defines the storage abstraction that lets the `AccountStore`
//! run against a JSON file, a CSV file, or an in-memory fake interchangeably.

use crate::types::{AccountRecords, BankError};

/// Trait for loading and saving the full account mapping
///
/// Implementations overwrite their storage in full on every `save`; there is no
/// incremental or append write.
pub trait StorageBackend {
    /// Read the persisted mapping
    ///
    /// Returns an empty mapping when nothing has been persisted yet, and
    /// `BankError::StorageCorrupt` when persisted data exists but is malformed.
    fn load(&self) -> Result<AccountRecords, BankError>;

    /// Replace the persisted mapping with `records`
    fn save(&mut self, records: &AccountRecords) -> Result<(), BankError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn load(&self) -> Result<AccountRecords, BankError> {
        (**self).load()
    }

    fn save(&mut self, records: &AccountRecords) -> Result<(), BankError> {
        (**self).save(records)
    }
}
