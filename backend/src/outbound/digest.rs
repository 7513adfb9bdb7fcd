//! SHA-256 digests of off-ledger artifacts.
//!
//! The ledger stores only a record's `fileHash`; this adapter computes it.

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the file at `path`.
///
/// # Errors
///
/// Returns an [`io::Error`] when the file cannot be opened or read.
pub fn sha256_file(path: &Utf8Path) -> io::Result<String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "input path must be a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|error| io::Error::other(format!("open parent directory '{parent}': {error}")))?;
    let mut file = directory
        .open(file_name)
        .map_err(|error| io::Error::other(format!("open file '{path}': {error}")))?;

    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 8 * 1024];
    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|error| io::Error::other(format!("read file '{path}': {error}")))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
