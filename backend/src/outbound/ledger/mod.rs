//! Ledger store adapters.

mod atomic_io;
mod memory;
mod snapshot;

pub use memory::{InMemoryLedger, LedgerTransaction};
pub use snapshot::{LedgerSnapshotFile, SNAPSHOT_VERSION, SnapshotError, SnapshotLock};
