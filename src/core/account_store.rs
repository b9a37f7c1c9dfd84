//! Account store module
//!
//! This module provides the `AccountStore` which owns every account, keeps the
//! manager PIN, and mirrors the full mapping into a `StorageBackend`.
//!
//! The AccountStore is responsible for:
//! - Loading the persisted mapping at construction
//! - Creating, looking up, and deleting accounts
//! - Resolving accounts by identifier and delegating mutations to `Account`
//! - Persisting the full mapping after every mutating call
//! - Providing the manager-gated listing in insertion order

use crate::core::traits::StorageBackend;
use crate::types::{Account, AccountId, AccountRecord, AccountRecords, BankError, Pin, DEFAULT_PIN};
use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Manager PIN used when none is configured
pub const DEFAULT_MANAGER_PIN: Pin = 9999;

/// Keyed collection of all accounts plus its persistence binding
///
/// In-memory state and persisted state are consistent whenever a mutating
/// method returns `Ok` or an account-level error; only a failing backend can
/// leave them apart.
pub struct AccountStore<B: StorageBackend> {
    backend: B,
    accounts: HashMap<AccountId, Account>,
    /// Identifiers in insertion order
    order: Vec<AccountId>,
    manager_pin: Pin,
}

impl<B: StorageBackend> AccountStore<B> {
    /// Open a store over `backend`, loading whatever it holds
    ///
    /// # Errors
    ///
    /// Returns `StorageCorrupt` if persisted data exists but is malformed, or
    /// `Io` if it cannot be read. The backend is never written on failure.
    pub fn open(backend: B, manager_pin: Pin) -> Result<Self, BankError> {
        let mut store = AccountStore {
            backend,
            accounts: HashMap::new(),
            order: Vec::new(),
            manager_pin,
        };
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory mapping with the backend's contents
    pub fn load(&mut self) -> Result<(), BankError> {
        let records = self.backend.load()?;

        self.accounts.clear();
        self.order.clear();
        for (id, record) in records {
            self.order.push(id.clone());
            self.accounts.insert(id, Account::from(record));
        }

        info!("Loaded {} account(s)", self.order.len());
        Ok(())
    }

    /// Overwrite the backend with the full in-memory mapping
    pub fn save(&mut self) -> Result<(), BankError> {
        let records = self.records();
        self.backend.save(&records)?;
        debug!("Saved {} account(s)", records.len());
        Ok(())
    }

    /// Snapshot of the mapping in its persisted form
    pub fn records(&self) -> AccountRecords {
        self.order
            .iter()
            .filter_map(|id| {
                self.accounts
                    .get(id)
                    .map(|account| (id.clone(), AccountRecord::from(account)))
            })
            .collect()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Create an account and persist
    ///
    /// # Errors
    ///
    /// Returns `AccountAlreadyExists` if `id` is taken; the existing account is
    /// left unchanged and nothing is written.
    pub fn create_account(
        &mut self,
        id: &str,
        initial_balance: Decimal,
        pin: Pin,
    ) -> Result<(), BankError> {
        if self.accounts.contains_key(id) {
            debug!("Refusing to create duplicate account {id}");
            return Err(BankError::account_already_exists(id));
        }

        self.order.push(id.to_string());
        self.accounts
            .insert(id.to_string(), Account::new(initial_balance, pin));
        self.save()?;

        info!("Created account {id}");
        Ok(())
    }

    /// Create an account with a zero balance and the default PIN
    pub fn create_default_account(&mut self, id: &str) -> Result<(), BankError> {
        self.create_account(id, Decimal::ZERO, DEFAULT_PIN)
    }

    /// Look up an account
    pub fn access_account(&self, id: &str) -> Result<&Account, BankError> {
        self.accounts
            .get(id)
            .ok_or_else(|| BankError::account_not_found(id))
    }

    /// Remove an account and persist
    pub fn delete_account(&mut self, id: &str) -> Result<(), BankError> {
        if self.accounts.remove(id).is_none() {
            return Err(BankError::account_not_found(id));
        }
        self.order.retain(|existing| existing != id);
        self.save()?;

        info!("Deleted account {id}");
        Ok(())
    }

    /// List every account with its balance, in insertion order
    ///
    /// # Errors
    ///
    /// Returns `AuthorizationFailed` if `manager_pin` does not match.
    pub fn list_accounts(&self, manager_pin: Pin) -> Result<Vec<(AccountId, Decimal)>, BankError> {
        if manager_pin != self.manager_pin {
            debug!("Account listing refused");
            return Err(BankError::AuthorizationFailed);
        }

        Ok(self
            .order
            .iter()
            .filter_map(|id| {
                self.accounts
                    .get(id)
                    .map(|account| (id.clone(), account.balance()))
            })
            .collect())
    }

    /// Deposit into account `id` and persist
    ///
    /// A deposit that would overflow the balance is rejected with
    /// `BalanceOverflow` after the unchanged mapping is saved.
    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), BankError> {
        let outcome = self.account_mut(id)?.try_deposit(amount);
        self.persist_outcome(id, "Deposit", outcome)
    }

    /// Withdraw from account `id` and persist
    ///
    /// The mapping is persisted whether or not the withdrawal is accepted; the
    /// withdrawal outcome is returned after a successful save.
    pub fn withdraw(&mut self, id: &str, amount: Decimal, pin: Pin) -> Result<(), BankError> {
        let outcome = self.account_mut(id)?.try_withdraw(amount, pin);
        self.persist_outcome(id, "Withdrawal", outcome)
    }

    /// Transfer between two accounts and persist
    ///
    /// Both identifiers are resolved here before the transfer is attempted. A
    /// missing receiver leaves the sender untouched. A transfer to self
    /// succeeds iff the withdrawal would, and leaves the balance unchanged.
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        pin: Pin,
    ) -> Result<(), BankError> {
        if !self.accounts.contains_key(from) {
            return Err(BankError::account_not_found(from));
        }

        let outcome = if from == to {
            // Balance ends where it started either way
            self.access_account(from)?.clone().try_withdraw(amount, pin)
        } else {
            match self.accounts.remove(to) {
                Some(mut receiver) => {
                    let outcome = self
                        .account_mut(from)
                        .and_then(|sender| sender.try_transfer(amount, &mut receiver, pin));
                    self.accounts.insert(to.to_string(), receiver);
                    outcome
                }
                None => Err(BankError::account_not_found(to)),
            }
        };

        self.persist_outcome(from, "Transfer", outcome)
    }

    /// Change the PIN of account `id` and persist
    pub fn change_pin(&mut self, id: &str, old_pin: Pin, new_pin: Pin) -> Result<(), BankError> {
        let outcome = self.account_mut(id)?.try_change_pin(old_pin, new_pin);
        self.persist_outcome(id, "PIN change", outcome)
    }

    fn account_mut(&mut self, id: &str) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| BankError::account_not_found(id))
    }

    fn persist_outcome(
        &mut self,
        id: &str,
        operation: &str,
        outcome: Result<(), BankError>,
    ) -> Result<(), BankError> {
        self.save()?;
        if let Err(e) = &outcome {
            debug!("{operation} on account {id} rejected: {e}");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryBackend;
    use rstest::{fixture, rstest};

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn balance<B: StorageBackend>(store: &AccountStore<B>, id: &str) -> Decimal {
        store.access_account(id).unwrap().balance()
    }

    #[fixture]
    fn store() -> AccountStore<MemoryBackend> {
        AccountStore::open(MemoryBackend::new(), DEFAULT_MANAGER_PIN).unwrap()
    }

    /// Backend whose persisted data can never be parsed
    struct CorruptBackend;

    impl StorageBackend for CorruptBackend {
        fn load(&self) -> Result<AccountRecords, BankError> {
            Err(BankError::storage_corrupt(
                std::path::Path::new("corrupt.json"),
                "expected value",
            ))
        }

        fn save(&mut self, _records: &AccountRecords) -> Result<(), BankError> {
            panic!("corrupt storage must never be overwritten");
        }
    }

    #[rstest]
    fn test_open_empty_backend(store: AccountStore<MemoryBackend>) {
        assert!(store.is_empty());
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn test_open_corrupt_backend_fails() {
        let result = AccountStore::open(CorruptBackend, DEFAULT_MANAGER_PIN);
        assert!(matches!(result, Err(BankError::StorageCorrupt { .. })));
    }

    #[rstest]
    fn test_create_account_persists(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(100), 1234).unwrap();

        assert_eq!(balance(&store, "A1"), dec(100));
        assert_eq!(store.backend().records(), &store.records());
        assert_eq!(store.backend().save_count(), 1);
    }

    #[rstest]
    fn test_create_default_account(mut store: AccountStore<MemoryBackend>) {
        store.create_default_account("A1").unwrap();

        let account = store.access_account("A1").unwrap();
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.pin(), DEFAULT_PIN);
    }

    #[rstest]
    fn test_create_existing_account_is_noop(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(100), 1234).unwrap();

        let result = store.create_account("A1", dec(5), 9999);
        assert_eq!(result, Err(BankError::account_already_exists("A1")));

        let account = store.access_account("A1").unwrap();
        assert_eq!(account.balance(), dec(100));
        assert_eq!(account.pin(), 1234);
        assert_eq!(store.backend().save_count(), 1);
    }

    #[rstest]
    fn test_access_missing_account(store: AccountStore<MemoryBackend>) {
        assert_eq!(
            store.access_account("nope"),
            Err(BankError::account_not_found("nope"))
        );
    }

    #[rstest]
    fn test_delete_account(mut store: AccountStore<MemoryBackend>) {
        store.create_default_account("A1").unwrap();
        store.create_default_account("A2").unwrap();

        store.delete_account("A1").unwrap();
        assert!(store.access_account("A1").is_err());
        assert!(store.backend().records().get("A1").is_none());
        assert_eq!(store.len(), 1);

        assert_eq!(
            store.delete_account("A1"),
            Err(BankError::account_not_found("A1"))
        );
        assert_eq!(store.backend().save_count(), 3);
    }

    #[rstest]
    #[case::wrong_pin(1234, Err(BankError::AuthorizationFailed))]
    #[case::correct_pin(DEFAULT_MANAGER_PIN, Ok(vec![
        ("zeta".to_string(), Decimal::from(3)),
        ("alpha".to_string(), Decimal::from(1)),
        ("mid".to_string(), Decimal::from(2)),
    ]))]
    fn test_list_accounts(
        mut store: AccountStore<MemoryBackend>,
        #[case] manager_pin: Pin,
        #[case] expected: Result<Vec<(AccountId, Decimal)>, BankError>,
    ) {
        store.create_account("zeta", dec(3), 1).unwrap();
        store.create_account("alpha", dec(1), 1).unwrap();
        store.create_account("mid", dec(2), 1).unwrap();

        assert_eq!(store.list_accounts(manager_pin), expected);
    }

    #[rstest]
    fn test_failed_withdraw_still_persists(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(60), 1234).unwrap();

        assert_eq!(
            store.withdraw("A1", dec(1000), 1234),
            Err(BankError::insufficient_balance(dec(60), dec(1000)))
        );
        assert_eq!(balance(&store, "A1"), dec(60));
        assert_eq!(store.backend().save_count(), 2);
    }

    #[rstest]
    fn test_single_account_scenario(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(100), 1234).unwrap();

        store.withdraw("A1", dec(40), 1234).unwrap();
        assert_eq!(balance(&store, "A1"), dec(60));

        assert!(store.withdraw("A1", dec(1000), 1234).is_err());
        assert_eq!(balance(&store, "A1"), dec(60));

        store.deposit("A1", dec(15)).unwrap();
        assert_eq!(balance(&store, "A1"), dec(75));

        store.change_pin("A1", 1234, 4321).unwrap();
        assert_eq!(store.access_account("A1").unwrap().pin(), 4321);

        assert_eq!(store.withdraw("A1", dec(10), 1234), Err(BankError::InvalidPin));
        assert_eq!(balance(&store, "A1"), dec(75));

        let persisted = store.backend().records().get("A1").copied().unwrap();
        assert_eq!(persisted.balance, dec(75));
        assert_eq!(persisted.pin, 4321);
    }

    #[rstest]
    fn test_transfer_scenario(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(50), 1111).unwrap();
        store.create_account("A2", dec(0), 2222).unwrap();

        store.transfer("A1", "A2", dec(20), 1111).unwrap();
        assert_eq!(balance(&store, "A1"), dec(30));
        assert_eq!(balance(&store, "A2"), dec(20));
        assert_eq!(store.backend().records(), &store.records());
    }

    #[rstest]
    #[case::wrong_pin("A2", 20, 9999, BankError::InvalidPin)]
    #[case::insufficient("A2", 80, 1111, BankError::insufficient_balance(Decimal::from(50), Decimal::from(80)))]
    #[case::missing_receiver("A9", 20, 1111, BankError::account_not_found("A9"))]
    fn test_transfer_failure_changes_nothing(
        mut store: AccountStore<MemoryBackend>,
        #[case] to: &str,
        #[case] amount: i64,
        #[case] pin: Pin,
        #[case] expected: BankError,
    ) {
        store.create_account("A1", dec(50), 1111).unwrap();
        store.create_account("A2", dec(5), 2222).unwrap();

        assert_eq!(store.transfer("A1", to, dec(amount), pin), Err(expected));
        assert_eq!(balance(&store, "A1"), dec(50));
        assert_eq!(balance(&store, "A2"), dec(5));
        assert_eq!(store.len(), 2);
    }

    #[rstest]
    fn test_transfer_from_missing_sender(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A2", dec(5), 2222).unwrap();
        assert_eq!(
            store.transfer("A1", "A2", dec(1), 1111),
            Err(BankError::account_not_found("A1"))
        );
        assert_eq!(balance(&store, "A2"), dec(5));
    }

    #[rstest]
    fn test_transfer_to_self(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(50), 1111).unwrap();

        store.transfer("A1", "A1", dec(20), 1111).unwrap();
        assert_eq!(balance(&store, "A1"), dec(50));

        assert!(store.transfer("A1", "A1", dec(80), 1111).is_err());
        assert_eq!(balance(&store, "A1"), dec(50));
    }

    #[rstest]
    fn test_deposit_overflow_persists_unchanged(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", Decimal::MAX, 1234).unwrap();

        assert_eq!(store.deposit("A1", dec(1)), Err(BankError::BalanceOverflow));
        assert_eq!(balance(&store, "A1"), Decimal::MAX);
        assert_eq!(store.backend().records(), &store.records());
        assert_eq!(store.backend().save_count(), 2);
    }

    #[rstest]
    fn test_transfer_overflow_changes_nothing(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(50), 1111).unwrap();
        store.create_account("A2", Decimal::MAX, 2222).unwrap();

        assert_eq!(
            store.transfer("A1", "A2", dec(20), 1111),
            Err(BankError::BalanceOverflow)
        );
        assert_eq!(balance(&store, "A1"), dec(50));
        assert_eq!(balance(&store, "A2"), Decimal::MAX);
    }

    #[rstest]
    fn test_transfer_keeps_listing_order(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(50), 1111).unwrap();
        store.create_account("A2", dec(0), 2222).unwrap();
        store.create_account("A3", dec(0), 3333).unwrap();

        store.transfer("A3", "A1", dec(0), 3333).unwrap();
        let ids: Vec<AccountId> = store
            .list_accounts(DEFAULT_MANAGER_PIN)
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["A1", "A2", "A3"]);
    }

    #[rstest]
    fn test_round_trip_into_fresh_store(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", Decimal::new(7525, 2), 4321).unwrap();
        store.create_account("B", dec(0), 1).unwrap();
        store.deposit("B", Decimal::new(5, 1)).unwrap();

        let reopened = AccountStore::open(store.backend().clone(), DEFAULT_MANAGER_PIN).unwrap();
        assert_eq!(reopened.records(), store.records());
        assert_eq!(reopened.access_account("A1").unwrap().pin(), 4321);
    }

    #[rstest]
    fn test_load_discards_unsaved_state(mut store: AccountStore<MemoryBackend>) {
        store.create_account("A1", dec(10), 1234).unwrap();
        store.accounts.get_mut("A1").unwrap().deposit(dec(5));

        store.load().unwrap();
        assert_eq!(balance(&store, "A1"), dec(10));
    }
}
