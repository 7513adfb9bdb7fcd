//! Case documents.

use serde::{Deserialize, Serialize};

use crate::domain::document::policy_reference;
use crate::domain::{EntityKind, LedgerDocument};

/// Status assigned to every newly created case.
pub const INITIAL_CASE_STATUS: &str = "Open";

/// An investigation case, optionally bound to an access policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub jurisdiction: String,
    pub case_type: String,
    pub created_by: String,
    pub created_at: String,
    pub organization: String,
    #[serde(with = "policy_reference")]
    pub policy_id: Option<String>,
}

impl LedgerDocument for Case {
    const KIND: EntityKind = EntityKind::Case;

    fn ledger_id(&self) -> &str {
        &self.id
    }
}
