//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and single-account operations
//! - `record`: Persisted form of the account mapping
//! - `error`: Error types for the ATM bank

pub mod account;
pub mod error;
pub mod record;

pub use account::{Account, AccountId, Pin, DEFAULT_PIN};
pub use error::BankError;
pub use record::{AccountRecord, AccountRecords};
