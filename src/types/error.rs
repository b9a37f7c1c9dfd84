//! Error types for the ATM bank
//!
//! This module defines all error types that can occur while operating on
//! accounts or their persisted state.
//!
//! # Error Categories
//!
//! - **Account Errors**: Invalid PIN, insufficient balance, balance overflow
//! - **Store Errors**: Unknown or duplicate account identifiers, manager PIN mismatch
//! - **Storage Errors**: Unreadable or malformed persisted file, I/O failures

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ATM bank
///
/// Account-level failures (`InvalidPin`, `InsufficientBalance`, `BalanceOverflow`)
/// are recoverable:
/// the operation is rejected and the account is left untouched. `StorageCorrupt`
/// and `Io` are fatal when raised while opening a store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// The supplied PIN does not match the account PIN
    #[error("Invalid PIN")]
    InvalidPin,

    /// Withdrawal or transfer amount exceeds the balance
    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Current balance
        available: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// No account exists with the given identifier
    #[error("Account {id} not found")]
    AccountNotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// An account with the given identifier already exists
    #[error("Account {id} already exists")]
    AccountAlreadyExists {
        /// The duplicated identifier
        id: String,
    },

    /// The resulting balance is outside the range a `Decimal` can hold
    #[error("Balance overflow")]
    BalanceOverflow,

    /// Manager PIN mismatch on the full listing
    #[error("Invalid manager PIN")]
    AuthorizationFailed,

    /// The persisted file exists but cannot be parsed into the expected shape
    ///
    /// Raised at store construction; the store refuses to open rather than
    /// treating the file as empty.
    #[error("Storage file {path} is corrupt: {message}")]
    StorageCorrupt {
        /// Path of the persisted file
        path: String,
        /// Description of the parse failure
        message: String,
    },

    /// I/O error occurred while reading or writing the persisted file
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

// Serialization failures on write are reported as I/O errors; parse failures on
// read are mapped to StorageCorrupt by the backends, which know the path.
impl From<serde_json::Error> for BankError {
    fn from(error: serde_json::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl BankError {
    /// Create an InsufficientBalance error
    pub fn insufficient_balance(available: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientBalance {
            available,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        BankError::AccountNotFound { id: id.to_string() }
    }

    /// Create an AccountAlreadyExists error
    pub fn account_already_exists(id: &str) -> Self {
        BankError::AccountAlreadyExists { id: id.to_string() }
    }

    /// Create a StorageCorrupt error
    pub fn storage_corrupt(path: &std::path::Path, message: impl ToString) -> Self {
        BankError::StorageCorrupt {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}
