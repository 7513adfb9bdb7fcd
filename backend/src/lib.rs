//! Case-management ledger core: policy-guarded cases and evidence records
//! over an ordered key-value store.

pub mod config;
pub mod domain;
#[cfg(feature = "ledger-fixtures")]
pub mod fixtures;
pub mod inbound;
pub mod outbound;
