//! CSV file storage
//!
//! Line-delimited alternative to the JSON store, one account per row:
//!
//! ```text
//! account,balance,pin
//! A1,75.25,4321
//! A2,0,1234
//! ```
//!
//! Row conversion and output serialization are pure functions for easy
//! testing; `CsvFileBackend` adds the file handling on top.

use crate::core::traits::StorageBackend;
use crate::types::{AccountId, AccountRecord, AccountRecords, BankError, Pin};
use csv::{ReaderBuilder, Trim, Writer};
use log::{debug, info};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// CSV row structure for deserialization
///
/// The balance is read as text and parsed into a `Decimal` so no precision is
/// lost going through a float.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvAccountRow {
    pub account: AccountId,
    pub balance: String,
    pub pin: Pin,
}

/// Convert a CsvAccountRow into an identifier and stored record
///
/// Any identifier is accepted, the empty one included, so every account the
/// store can hold survives a save and reload.
pub fn convert_csv_row(row: CsvAccountRow) -> Result<(AccountId, AccountRecord), String> {
    let balance = Decimal::from_str(row.balance.trim())
        .map_err(|_| format!("Invalid balance '{}' for account {}", row.balance, row.account))?;

    Ok((
        row.account,
        AccountRecord {
            balance,
            pin: row.pin,
        },
    ))
}

/// Parse every row of a CSV account file
///
/// Any malformed row fails the whole read; the error message carries the line
/// number where available.
pub fn read_records_csv<R: Read>(input: R) -> Result<AccountRecords, String> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    let mut records = AccountRecords::new();
    for result in reader.deserialize::<CsvAccountRow>() {
        let row = result.map_err(|e| {
            let line = e.position().map(|pos| pos.line());
            match line {
                Some(line) => format!("line {}: {}", line, e),
                None => e.to_string(),
            }
        })?;
        let (id, record) = convert_csv_row(row)?;
        records.insert(id, record);
    }

    Ok(records)
}

/// Write account records in CSV format
///
/// Writes columns `account,balance,pin` in the records' order.
pub fn write_records_csv(records: &AccountRecords, output: &mut dyn Write) -> Result<(), BankError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["account", "balance", "pin"])?;
    for (id, record) in records.iter() {
        writer.write_record(&[
            id.clone(),
            record.balance.to_string(),
            record.pin.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

/// CSV file backed storage
#[derive(Debug, Clone)]
pub struct CsvFileBackend {
    path: PathBuf,
}

impl CsvFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for CsvFileBackend {
    fn load(&self) -> Result<AccountRecords, BankError> {
        if !self.path.exists() {
            info!(
                "No data file at '{}', starting with no accounts",
                self.path.display()
            );
            return Ok(AccountRecords::new());
        }

        let file = File::open(&self.path)?;
        let records =
            read_records_csv(file).map_err(|e| BankError::storage_corrupt(&self.path, e))?;

        debug!(
            "Read {} record(s) from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn save(&mut self, records: &AccountRecords) -> Result<(), BankError> {
        let mut file = File::create(&self.path)?;
        write_records_csv(records, &mut file)
    }
}
