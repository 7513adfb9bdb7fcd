//! Wiring for `cdms seed`: settings and registry loading.

mod config;
mod startup;

pub use config::LedgerFixtureSettings;
pub use startup::{SeedingError, seed_ledger};
