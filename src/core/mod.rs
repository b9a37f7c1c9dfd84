//! Core business logic module
//!
//! This module contains the account store and its persistence seam:
//! - `traits` - Storage backend abstraction
//! - `account_store` - Account collection, manager-gated listing, persistence

pub mod account_store;
pub mod traits;

pub use account_store::{AccountStore, DEFAULT_MANAGER_PIN};
pub use traits::StorageBackend;
