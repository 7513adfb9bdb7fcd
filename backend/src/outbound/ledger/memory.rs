//! In-memory world state with per-invocation transactions.
//!
//! [`InMemoryLedger`] keeps every entry in one ordered map behind a mutex.
//! A [`LedgerTransaction`] holds that mutex for its whole lifetime, so two
//! invocations never interleave, and buffers writes until
//! [`LedgerTransaction::commit`]. Dropping a transaction without committing
//! discards its writes.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Mutex, MutexGuard};

use crate::domain::ports::{LedgerEntry, LedgerStore, LedgerStoreError};
use crate::domain::{Error, KeyRange, LedgerKey};

type State = BTreeMap<String, Vec<u8>>;

fn poisoned() -> LedgerStoreError {
    LedgerStoreError::unavailable("ledger lock poisoned by an earlier panic")
}

fn range_of<'a>(state: &'a State, range: &KeyRange) -> impl Iterator<Item = (&'a String, &'a Vec<u8>)> {
    state.range::<str, _>((Bound::Included(range.start()), Bound::Excluded(range.end())))
}

/// Ordered key-value world state held in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: Mutex<State>,
}

impl InMemoryLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger pre-populated with `entries`.
    pub fn from_entries(entries: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            state: Mutex::new(entries),
        }
    }

    /// Copy of every stored entry, in key order.
    pub fn entries(&self) -> Result<BTreeMap<String, Vec<u8>>, LedgerStoreError> {
        self.lock().map(|state| state.clone())
    }

    /// Begin an invocation. Blocks until no other transaction is open.
    pub fn transaction(&self) -> Result<LedgerTransaction<'_>, LedgerStoreError> {
        Ok(LedgerTransaction {
            state: self.lock()?,
            pending: RefCell::default(),
        })
    }

    /// Run `operation` in a transaction, committing only when it succeeds.
    pub fn transact<T, F>(&self, operation: F) -> Result<T, Error>
    where
        F: FnOnce(&LedgerTransaction<'_>) -> Result<T, Error>,
    {
        let transaction = self.transaction()?;
        let value = operation(&transaction)?;
        let applied = transaction.commit();
        tracing::debug!(applied, "ledger transaction committed");
        Ok(value)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, LedgerStoreError> {
        self.state.lock().map_err(|_| poisoned())
    }
}

/// Each call runs as its own single-operation transaction.
impl LedgerStore for InMemoryLedger {
    fn get_state(&self, key: &LedgerKey) -> Result<Option<Vec<u8>>, LedgerStoreError> {
        Ok(self.lock()?.get(key.as_str()).cloned())
    }

    fn put_state(&self, key: &LedgerKey, value: Vec<u8>) -> Result<(), LedgerStoreError> {
        self.lock()?.insert(key.as_str().to_owned(), value);
        Ok(())
    }

    fn delete_state(&self, key: &LedgerKey) -> Result<(), LedgerStoreError> {
        self.lock()?.remove(key.as_str());
        Ok(())
    }

    fn get_state_by_range(&self, range: &KeyRange) -> Result<Vec<LedgerEntry>, LedgerStoreError> {
        let state = self.lock()?;
        Ok(range_of(&state, range)
            .map(|(key, value)| LedgerEntry::new(key.as_str(), value.clone()))
            .collect())
    }
}

/// Exclusive, buffered view of an [`InMemoryLedger`].
///
/// Reads observe the transaction's own pending writes. `None` in the buffer
/// marks a pending delete.
pub struct LedgerTransaction<'a> {
    state: MutexGuard<'a, State>,
    pending: RefCell<BTreeMap<String, Option<Vec<u8>>>>,
}

impl LedgerTransaction<'_> {
    /// Whether any write or delete is buffered.
    pub fn is_dirty(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Apply buffered writes and release the lock.
    ///
    /// Returns the number of keys written or removed.
    pub fn commit(self) -> usize {
        let Self { mut state, pending } = self;
        let pending = pending.into_inner();
        let applied = pending.len();
        for (key, value) in pending {
            match value {
                Some(bytes) => {
                    state.insert(key, bytes);
                }
                None => {
                    state.remove(&key);
                }
            }
        }
        applied
    }
}

impl LedgerStore for LedgerTransaction<'_> {
    fn get_state(&self, key: &LedgerKey) -> Result<Option<Vec<u8>>, LedgerStoreError> {
        if let Some(buffered) = self.pending.borrow().get(key.as_str()) {
            return Ok(buffered.clone());
        }
        Ok(self.state.get(key.as_str()).cloned())
    }

    fn put_state(&self, key: &LedgerKey, value: Vec<u8>) -> Result<(), LedgerStoreError> {
        self.pending
            .borrow_mut()
            .insert(key.as_str().to_owned(), Some(value));
        Ok(())
    }

    fn delete_state(&self, key: &LedgerKey) -> Result<(), LedgerStoreError> {
        self.pending.borrow_mut().insert(key.as_str().to_owned(), None);
        Ok(())
    }

    fn get_state_by_range(&self, range: &KeyRange) -> Result<Vec<LedgerEntry>, LedgerStoreError> {
        let pending = self.pending.borrow();
        let mut merged: BTreeMap<&str, &[u8]> = range_of(&self.state, range)
            .map(|(key, value)| (key.as_str(), value.as_slice()))
            .collect();
        for (key, value) in pending.range::<str, _>((
            Bound::Included(range.start()),
            Bound::Excluded(range.end()),
        )) {
            match value {
                Some(bytes) => {
                    merged.insert(key.as_str(), bytes.as_slice());
                }
                None => {
                    merged.remove(key.as_str());
                }
            }
        }
        Ok(merged
            .into_iter()
            .map(|(key, value)| LedgerEntry::new(key, value))
            .collect())
    }
}
