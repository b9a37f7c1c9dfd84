//! ATM Bank Library
//! # Overview
//!
//! This library simulates ATM account management for a single user session:
//! accounts are created, funded, debited, transferred between, and deleted,
//! and the full account mapping is persisted to a flat file after every change.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, persisted records, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::account_store`] - Account collection, manager-gated listing, persistence
//!   - [`core::traits`] - Storage backend abstraction
//! - [`io`] - JSON, CSV, and in-memory storage backends
//! - [`menu`] - Interactive text menu driving the store
//!
//! # Account Operations
//!
//! - **Withdraw**: Requires the account PIN and a sufficient balance
//! - **Deposit**: Always succeeds
//! - **Transfer**: A PIN-checked withdrawal followed by a deposit into the receiver
//! - **Change PIN**: Requires the current PIN
//!
//! Rejected operations leave every account unchanged.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod menu;
pub mod types;

pub use crate::core::{AccountStore, StorageBackend};
pub use io::{CsvFileBackend, JsonFileBackend, MemoryBackend};
pub use types::{Account, AccountId, AccountRecord, AccountRecords, BankError, Pin};
