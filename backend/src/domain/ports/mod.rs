//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_resolver;
mod ledger_store;

#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use identity_resolver::{IdentityError, IdentityResolver};
#[cfg(test)]
pub use ledger_store::MockLedgerStore;
pub use ledger_store::{LedgerEntry, LedgerStore, LedgerStoreError};
