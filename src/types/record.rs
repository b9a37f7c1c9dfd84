//! Persisted account records
//!
//! `AccountRecords` is the durable form of the store: identifier →
//! `(balance, pin)` in insertion order. It is what storage backends read and
//! write, independent of the encoding they use.
//!
//! The serde form is a map whose values are two-element sequences:
//!
//! ```json
//! {"A1": [75.0, 4321], "A2": [20.0, 1234]}
//! ```

use super::account::{Account, AccountId, Pin};
use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stored state of a single account
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredPair", into = "StoredPair")]
pub struct AccountRecord {
    pub balance: Decimal,
    pub pin: Pin,
}

/// On-disk `[balance, pin]` pair
///
/// The balance is written as a JSON number carrying the decimal's exact
/// digits, never rounded through `f64`. Integer and float numbers both read.
#[derive(Serialize, Deserialize)]
struct StoredPair(
    #[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal,
    Pin,
);

impl From<StoredPair> for AccountRecord {
    fn from(StoredPair(balance, pin): StoredPair) -> Self {
        AccountRecord { balance, pin }
    }
}

impl From<AccountRecord> for StoredPair {
    fn from(record: AccountRecord) -> Self {
        StoredPair(record.balance, record.pin)
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        AccountRecord {
            balance: account.balance(),
            pin: account.pin(),
        }
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Account::new(record.balance, record.pin)
    }
}

/// Ordered mapping of account identifier to stored record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRecords {
    entries: Vec<(AccountId, AccountRecord)>,
}

impl AccountRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record
    ///
    /// A replaced identifier keeps its original position.
    pub fn insert(&mut self, id: AccountId, record: AccountRecord) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = record,
            None => self.entries.push((id, record)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&AccountRecord> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &AccountRecord)> {
        self.entries.iter().map(|(id, record)| (id, record))
    }
}

impl IntoIterator for AccountRecords {
    type Item = (AccountId, AccountRecord);
    type IntoIter = std::vec::IntoIter<(AccountId, AccountRecord)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(AccountId, AccountRecord)> for AccountRecords {
    fn from_iter<I: IntoIterator<Item = (AccountId, AccountRecord)>>(iter: I) -> Self {
        let mut records = AccountRecords::new();
        for (id, record) in iter {
            records.insert(id, record);
        }
        records
    }
}

impl Serialize for AccountRecords {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

struct AccountRecordsVisitor;

impl<'de> Visitor<'de> for AccountRecordsVisitor {
    type Value = AccountRecords;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of account identifier to [balance, pin]")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut records = AccountRecords::new();
        while let Some((id, record)) = access.next_entry::<AccountId, AccountRecord>()? {
            records.insert(id, record);
        }
        Ok(records)
    }
}

impl<'de> Deserialize<'de> for AccountRecords {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AccountRecordsVisitor)
    }
}
