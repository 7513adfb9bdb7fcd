//! In-process ledger store used by domain unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ops::Bound;

use crate::domain::ports::{LedgerEntry, LedgerStore, LedgerStoreError};
use crate::domain::{KeyRange, LedgerKey};

/// Ordered map behind a `RefCell`; writes apply immediately.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under an arbitrary key.
    pub fn insert_raw(&self, key: &str, value: &[u8]) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_vec());
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl LedgerStore for MemoryStore {
    fn get_state(&self, key: &LedgerKey) -> Result<Option<Vec<u8>>, LedgerStoreError> {
        Ok(self.raw(key.as_str()))
    }

    fn put_state(&self, key: &LedgerKey, value: Vec<u8>) -> Result<(), LedgerStoreError> {
        self.entries
            .borrow_mut()
            .insert(key.as_str().to_owned(), value);
        Ok(())
    }

    fn delete_state(&self, key: &LedgerKey) -> Result<(), LedgerStoreError> {
        self.entries.borrow_mut().remove(key.as_str());
        Ok(())
    }

    fn get_state_by_range(&self, range: &KeyRange) -> Result<Vec<LedgerEntry>, LedgerStoreError> {
        let entries = self.entries.borrow();
        Ok(entries
            .range::<str, _>((Bound::Included(range.start()), Bound::Excluded(range.end())))
            .map(|(key, value)| LedgerEntry::new(key.as_str(), value.clone()))
            .collect())
    }
}
