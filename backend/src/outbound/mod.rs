//! Outbound adapters implementing domain ports for the ledger's storage and
//! identity needs.
//!
//! - **ledger**: in-memory transactional world state and its JSON snapshot
//!   file
//! - **identity**: configuration-backed caller identity
//! - **digest**: content hashing for off-ledger artifacts
//!
//! Adapters translate between domain types and infrastructure. They contain
//! no business logic.

pub mod digest;
pub mod identity;
pub mod ledger;
