//! Typed entity persistence over the ledger store port.

use crate::domain::document::{self, ScanItem};
use crate::domain::ports::{LedgerStore, LedgerStoreError};
use crate::domain::{Case, Error, LedgerDocument, LedgerKey};

/// Documents that may be removed from the ledger.
pub trait Deletable: LedgerDocument {}

impl Deletable for Case {}

fn map_store_error<D: LedgerDocument>(action: &str, id: &str, error: LedgerStoreError) -> Error {
    Error::dependency_failure(format!("failed to {action} {} {id}: {error}", D::KIND))
}

/// Create, read, delete, update and scan for every document kind.
pub struct EntityRepository<'s, S: ?Sized> {
    store: &'s S,
}

impl<S: ?Sized> Clone for EntityRepository<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for EntityRepository<'_, S> {}

impl<'s, S> EntityRepository<'s, S>
where
    S: LedgerStore + ?Sized,
{
    /// Wrap a ledger store.
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Fail with `AlreadyExists` when `id` is taken.
    pub fn ensure_absent<D: LedgerDocument>(&self, id: &str) -> Result<(), Error> {
        let key = LedgerKey::new(D::KIND, id);
        let existing = self
            .store
            .get_state(&key)
            .map_err(|err| map_store_error::<D>("check", id, err))?;
        match existing {
            Some(_) => Err(Error::already_exists(format!("{} {id} already exists", D::KIND))),
            None => Ok(()),
        }
    }

    /// Write `document` without an existence check.
    pub fn put<D: LedgerDocument>(&self, document: &D) -> Result<(), Error> {
        let id = document.ledger_id();
        let bytes = document::encode(document)?;
        self.store
            .put_state(&LedgerKey::new(D::KIND, id), bytes)
            .map_err(|err| map_store_error::<D>("write", id, err))
    }

    /// Store a new document; `AlreadyExists` leaves the stored value as is.
    pub fn create<D: LedgerDocument>(&self, document: &D) -> Result<(), Error> {
        self.ensure_absent::<D>(document.ledger_id())?;
        self.put(document)
    }

    /// Read `id`, returning `None` when absent.
    pub fn find<D: LedgerDocument>(&self, id: &str) -> Result<Option<D>, Error> {
        let bytes = self
            .store
            .get_state(&LedgerKey::new(D::KIND, id))
            .map_err(|err| map_store_error::<D>("read", id, err))?;
        bytes
            .map(|bytes| document::decode::<D>(id, &bytes))
            .transpose()
    }

    /// Read `id`, failing with `NotFound` when absent.
    pub fn get<D: LedgerDocument>(&self, id: &str) -> Result<D, Error> {
        self.find(id)?
            .ok_or_else(|| Error::not_found(format!("{} {id} not found", D::KIND)))
    }

    /// Remove `id`, failing with `NotFound` when absent.
    pub fn delete<D: Deletable>(&self, id: &str) -> Result<(), Error> {
        let key = LedgerKey::new(D::KIND, id);
        let existing = self
            .store
            .get_state(&key)
            .map_err(|err| map_store_error::<D>("read", id, err))?;
        if existing.is_none() {
            return Err(Error::not_found(format!("{} {id} not found", D::KIND)));
        }
        self.store
            .delete_state(&key)
            .map_err(|err| map_store_error::<D>("delete", id, err))
    }

    /// Every document of kind `D`, in key order.
    ///
    /// Entries carrying another `docType` are skipped; an undecodable entry
    /// aborts the scan.
    pub fn scan<D: LedgerDocument>(&self) -> Result<Vec<D>, Error> {
        let entries = self
            .store
            .get_state_by_range(&D::KIND.range())
            .map_err(|err| {
                Error::dependency_failure(format!("failed to scan {} entries: {err}", D::KIND))
            })?;
        let mut documents = Vec::with_capacity(entries.len());
        for entry in entries {
            match document::decode_scanned::<D>(&entry.key, &entry.value)? {
                ScanItem::Matched(document) => documents.push(document),
                ScanItem::Foreign => {
                    tracing::debug!(key = %entry.key, kind = %D::KIND, "skipping foreign docType");
                }
            }
        }
        Ok(documents)
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
