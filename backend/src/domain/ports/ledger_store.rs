//! Port abstraction over the ordered key-value world state.
//!
//! Adapters must give every contract invocation an atomic view: reads observe
//! a consistent state and writes become visible together or not at all. The
//! in-memory transaction in `outbound::ledger` is the reference adapter.

use crate::domain::{KeyRange, LedgerKey};

use super::define_port_error;

define_port_error! {
    /// Failures raised by ledger store adapters.
    pub enum LedgerStoreError {
        /// The store cannot be reached or its lock is unusable.
        Unavailable { message: String } => "ledger store unavailable: {message}",
        /// A point read or range read failed.
        Read { message: String } => "ledger read failed: {message}",
        /// A write or delete could not be recorded.
        Write { message: String } => "ledger write failed: {message}",
    }
}

/// One key-value pair returned by a range read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Full ledger key, prefix included.
    pub key: String,
    /// Raw stored bytes.
    pub value: Vec<u8>,
}

impl LedgerEntry {
    /// Build an entry from any key and byte source.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered key-value store backing every entity.
///
/// Range reads return entries in ascending byte order of their keys, with the
/// start bound included and the end bound excluded.
#[cfg_attr(test, mockall::automock)]
pub trait LedgerStore {
    /// Read the bytes stored under `key`, if any.
    fn get_state(&self, key: &LedgerKey) -> Result<Option<Vec<u8>>, LedgerStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn put_state(&self, key: &LedgerKey, value: Vec<u8>) -> Result<(), LedgerStoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete_state(&self, key: &LedgerKey) -> Result<(), LedgerStoreError>;

    /// Read every entry whose key falls inside `range`.
    fn get_state_by_range(&self, range: &KeyRange) -> Result<Vec<LedgerEntry>, LedgerStoreError>;
}
