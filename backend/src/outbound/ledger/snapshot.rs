//! JSON snapshot file holding the ledger between invocations.
//!
//! ```json
//! {"version": 1, "entries": {"case:C1": "{\"docType\":\"case\",...}"}}
//! ```
//!
//! Each entry value is the stored document's JSON text. A missing file is an
//! empty ledger.
//!
//! Reads and writes go through a [`SnapshotLock`], an exclusive OS lock on the
//! sidecar `<file>.lock`. Holding it from load through store keeps concurrent
//! processes from both seeing a key as absent or overwriting each other.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::atomic_io::write_atomic;
use super::memory::InMemoryLedger;
use crate::domain::Error;
use crate::domain::ports::LedgerStoreError;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Failures reading or writing a snapshot file.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The path has no file name component.
    #[error("snapshot path {path} must name a file")]
    InvalidPath {
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// Filesystem access failed.
    #[error("failed to {action} snapshot {path}: {source}")]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid snapshot document.
    #[error("malformed snapshot {path}: {message}")]
    Malformed {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Parser message.
        message: String,
    },
    /// The file was written by an incompatible format version.
    #[error(
        "unsupported snapshot version {found} in {path} (expected {expected})",
        expected = SNAPSHOT_VERSION
    )]
    UnsupportedVersion {
        /// Snapshot path.
        path: Utf8PathBuf,
        /// Version found in the file.
        found: u32,
    },
    /// A stored value is not UTF-8 text and cannot be written as JSON.
    #[error("ledger entry {key} is not UTF-8 text")]
    NonTextEntry {
        /// Key of the offending entry.
        key: String,
    },
    /// Another process holds the snapshot lock.
    #[error("snapshot {path} is locked by another invocation")]
    Locked {
        /// Snapshot path.
        path: Utf8PathBuf,
    },
    /// The in-memory ledger could not be read.
    #[error(transparent)]
    Store(#[from] LedgerStoreError),
}

impl From<SnapshotError> for Error {
    fn from(err: SnapshotError) -> Self {
        Self::dependency_failure(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Snapshot file at a fixed path.
#[derive(Debug, Clone)]
pub struct LedgerSnapshotFile {
    path: Utf8PathBuf,
}

impl LedgerSnapshotFile {
    /// Snapshot stored at `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Take the snapshot lock, waiting for any other holder to release it.
    pub fn lock(&self) -> Result<SnapshotLock<'_>, SnapshotError> {
        let file = self.open_lock_file()?;
        file.lock_exclusive()
            .map_err(|source| self.io("lock", source))?;
        tracing::debug!(path = %self.path, "snapshot lock acquired");
        Ok(SnapshotLock { snapshot: self, file })
    }

    /// Take the snapshot lock, or fail with [`SnapshotError::Locked`] if it
    /// is already held.
    pub fn try_lock(&self) -> Result<SnapshotLock<'_>, SnapshotError> {
        let file = self.open_lock_file()?;
        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!(path = %self.path, "snapshot lock acquired");
                Ok(SnapshotLock { snapshot: self, file })
            }
            Err(err) if is_contended(&err) => Err(SnapshotError::Locked {
                path: self.path.clone(),
            }),
            Err(source) => Err(self.io("lock", source)),
        }
    }

    fn open_lock_file(&self) -> Result<File, SnapshotError> {
        let (dir, file_name) = self.open_parent()?;
        let lock_name = format!("{file_name}.lock");
        let mut options = OpenOptions::new();
        options.create(true).write(true);
        dir.open_with(&lock_name, &options)
            .map(cap_std::fs::File::into_std)
            .map_err(|source| self.io("open lock for", source))
    }

    fn load(&self) -> Result<InMemoryLedger, SnapshotError> {
        let (dir, file_name) = self.open_parent()?;
        let text = match dir.read_to_string(file_name) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path, "no snapshot yet, starting empty");
                return Ok(InMemoryLedger::new());
            }
            Err(source) => return Err(self.io("read", source)),
        };

        let document: SnapshotDocument =
            serde_json::from_str(&text).map_err(|err| SnapshotError::Malformed {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        if document.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                path: self.path.clone(),
                found: document.version,
            });
        }

        let entries = document
            .entries
            .into_iter()
            .map(|(key, value)| (key, value.into_bytes()))
            .collect();
        Ok(InMemoryLedger::from_entries(entries))
    }

    fn store(&self, ledger: &InMemoryLedger) -> Result<(), SnapshotError> {
        let entries = ledger
            .entries()?
            .into_iter()
            .map(|(key, value)| match String::from_utf8(value) {
                Ok(text) => Ok((key, text)),
                Err(_) => Err(SnapshotError::NonTextEntry { key }),
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        let count = entries.len();
        let document = SnapshotDocument {
            version: SNAPSHOT_VERSION,
            entries,
        };
        let mut bytes =
            serde_json::to_vec_pretty(&document).map_err(|err| SnapshotError::Malformed {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        bytes.push(b'\n');

        let (dir, file_name) = self.open_parent()?;
        write_atomic(&dir, file_name, &bytes).map_err(|source| self.io("write", source))?;
        tracing::debug!(path = %self.path, entries = count, "snapshot written");
        Ok(())
    }

    fn open_parent(&self) -> Result<(Dir, &str), SnapshotError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| SnapshotError::InvalidPath {
                path: self.path.clone(),
            })?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|source| self.io("open directory of", source))?;
        Ok((dir, file_name))
    }

    fn io(&self, action: &'static str, source: io::Error) -> SnapshotError {
        SnapshotError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Exclusive hold on a snapshot file; released on drop.
#[derive(Debug)]
pub struct SnapshotLock<'a> {
    snapshot: &'a LedgerSnapshotFile,
    file: File,
}

impl SnapshotLock<'_> {
    /// Read the snapshot into a fresh in-memory ledger.
    pub fn load(&self) -> Result<InMemoryLedger, SnapshotError> {
        self.snapshot.load()
    }

    /// Replace the snapshot with the ledger's current entries.
    pub fn store(&self, ledger: &InMemoryLedger) -> Result<(), SnapshotError> {
        self.snapshot.store(ledger)
    }
}

impl Drop for SnapshotLock<'_> {
    fn drop(&mut self) {
        if let Err(error) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.snapshot.path, %error, "failed to release snapshot lock");
        }
    }
}
