//! Organization documents.
//!
//! Organizations are read-only through the contract; they are written by
//! fixture seeding or by whoever provisions the ledger.

use serde::{Deserialize, Serialize};

use crate::domain::document::nullable_list;
use crate::domain::{EntityKind, LedgerDocument};

/// A participating organization and its member usernames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    pub org_id: String,
    pub name: String,
    /// Membership-service identifier.
    pub msp_id: String,
    #[serde(deserialize_with = "nullable_list::deserialize")]
    pub members: Vec<String>,
}

impl LedgerDocument for Organization {
    const KIND: EntityKind = EntityKind::Organization;

    fn ledger_id(&self) -> &str {
        &self.org_id
    }
}
