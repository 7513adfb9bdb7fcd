//! Registry loading and seeding entry point.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use ledger_fixtures::{FixtureRegistry, RegistryError};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::LedgerStore;
use crate::domain::{EntityRepository, FixtureSeedOutcome, FixtureSeeder, FixtureSeedingError};
use crate::fixtures::config::LedgerFixtureSettings;

/// Errors returned by [`seed_ledger`].
#[derive(Debug, Error)]
pub enum SeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Generation or ledger writes failed.
    #[error("fixture seeding error: {0}")]
    Seeding(#[from] FixtureSeedingError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Write the configured seed's organizations and members into `store`.
///
/// Entries that already exist are counted and left as they are.
pub fn seed_ledger<S>(
    settings: &LedgerFixtureSettings,
    store: &S,
) -> Result<FixtureSeedOutcome, SeedingError>
where
    S: LedgerStore + ?Sized,
{
    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(SeedingError::EmptySeedName);
    }

    let registry = load_registry(&settings.registry_path())?;
    let seeder = FixtureSeeder::new(EntityRepository::new(store));
    let outcome = seeder.seed_from_registry(&registry, seed_name)?;
    info!(
        seed = %outcome.seed_name,
        created = outcome.organizations_created + outcome.users_created,
        kept = outcome.organizations_existing + outcome.users_existing,
        "ledger seeding finished"
    );
    Ok(outcome)
}

fn load_registry(path: &Path) -> Result<FixtureRegistry, SeedingError> {
    let read_error = |source: std::io::Error| SeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(FixtureRegistry::from_json(&contents)?)
}
