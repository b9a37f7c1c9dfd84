//! JSON file storage
//!
//! Persists the account mapping as a single JSON object keyed by account
//! identifier, each value a `[balance, pin]` pair:
//!
//! ```json
//! {"A1": [75.25, 4321], "A2": [20, 1234]}
//! ```
//!
//! Balances are written with every digit of the `Decimal`; files holding float
//! balances such as `75.0` still load.
//!
//! Every save rewrites the whole file in place. There is no temporary file or
//! rename, so a crash mid-write can leave a truncated file behind; the next
//! load then fails with `StorageCorrupt`.

use crate::core::traits::StorageBackend;
use crate::types::{AccountRecords, BankError};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name for the JSON store
pub const DEFAULT_DATA_FILE: &str = "atm_data.json";

/// JSON file backed storage
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<AccountRecords, BankError> {
        if !self.path.exists() {
            info!(
                "No data file at '{}', starting with no accounts",
                self.path.display()
            );
            return Ok(AccountRecords::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let records = serde_json::from_str::<AccountRecords>(&contents)
            .map_err(|e| BankError::storage_corrupt(&self.path, e))?;

        debug!(
            "Read {} record(s) from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn save(&mut self, records: &AccountRecords) -> Result<(), BankError> {
        let contents = serde_json::to_string(records)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
