use crate::core::DEFAULT_MANAGER_PIN;
use crate::io::DEFAULT_DATA_FILE;
use crate::types::Pin;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Interactive ATM simulation with file-backed accounts
#[derive(Parser, Debug)]
#[command(name = "atm-bank")]
#[command(about = "Interactive ATM simulation with file-backed accounts", long_about = None)]
pub struct CliArgs {
    /// File the accounts are loaded from and saved to
    #[arg(
        long = "data-file",
        value_name = "PATH",
        help = "Account data file (default: atm_data.json, or atm_data.csv with --format csv)"
    )]
    pub data_file: Option<PathBuf>,

    /// Encoding of the data file
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "json",
        help = "Data file format: 'json' or 'csv'"
    )]
    pub format: StorageFormat,

    /// Secret gating the full account listing
    #[arg(
        long = "manager-pin",
        value_name = "PIN",
        default_value_t = DEFAULT_MANAGER_PIN,
        help = "Manager PIN for viewing all accounts"
    )]
    pub manager_pin: Pin,
}

/// Available encodings for the data file
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageFormat {
    Json,
    Csv,
}

impl StorageFormat {
    /// File name used when no data file is given
    pub fn default_file_name(self) -> &'static str {
        match self {
            StorageFormat::Json => DEFAULT_DATA_FILE,
            StorageFormat::Csv => "atm_data.csv",
        }
    }
}

impl CliArgs {
    /// Path of the data file, falling back to the format's default name
    pub fn data_path(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_file_name()))
    }
}
