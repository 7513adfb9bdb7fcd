//! Inbound adapters that translate external invocations into domain service
//! calls while keeping transport details at the edge.
//!
//! The string-typed contract surface lives under [`contract`]; the `cdms`
//! binary and any future transport sit on top of it.

pub mod contract;
