//! I/O module
//!
//! Storage backends for the account mapping.
//!
//! # Components
//!
//! - `json_format` - JSON file storage (default)
//! - `csv_format` - CSV file storage
//! - `memory` - In-memory storage for tests

pub mod csv_format;
pub mod json_format;
pub mod memory;

pub use csv_format::{read_records_csv, write_records_csv, CsvFileBackend};
pub use json_format::{JsonFileBackend, DEFAULT_DATA_FILE};
pub use memory::MemoryBackend;

use crate::cli::StorageFormat;
use crate::core::StorageBackend;
use std::path::Path;

/// Create a file backend for the given format
///
/// # Examples
///
/// ```no_run
/// use atm_bank::cli::StorageFormat;
/// use atm_bank::core::AccountStore;
/// use atm_bank::io::create_backend;
/// use std::path::Path;
///
/// let backend = create_backend(StorageFormat::Json, Path::new("atm_data.json"));
/// let store = AccountStore::open(backend, 9999).expect("Failed to open store");
/// ```
pub fn create_backend(format: StorageFormat, path: &Path) -> Box<dyn StorageBackend> {
    match format {
        StorageFormat::Json => Box::new(JsonFileBackend::new(path)),
        StorageFormat::Csv => Box::new(CsvFileBackend::new(path)),
    }
}
