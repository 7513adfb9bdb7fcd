//! Access policy documents.

use serde::{Deserialize, Serialize};

use crate::domain::document::nullable_list;
use crate::domain::{EntityKind, LedgerDocument};

/// Placeholder stored in `createdAt` for policies, users and cases.
pub const CREATED_AT_PLACEHOLDER: &str = "auto-generated";

/// Named rule listing the organizations and roles allowed to read the
/// entities that reference it.
///
/// Both lists are ordered but order does not affect evaluation; the literal
/// `"*"` matches any value on its axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    pub policy_id: String,
    #[serde(deserialize_with = "nullable_list::deserialize")]
    pub categories: Vec<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "nullable_list::deserialize"
    )]
    pub allowed_orgs: Vec<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "nullable_list::deserialize"
    )]
    pub allowed_roles: Vec<String>,
    pub created_at: String,
    pub created_by: String,
}

impl LedgerDocument for Policy {
    const KIND: EntityKind = EntityKind::Policy;

    fn ledger_id(&self) -> &str {
        &self.policy_id
    }
}
