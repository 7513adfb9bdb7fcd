//! User documents.

use serde::{Deserialize, Serialize};

use crate::domain::{EntityKind, LedgerDocument};

/// A stored user.
///
/// `password_hash` is opaque: it is produced elsewhere and returned verbatim
/// by `QueryUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub organization: String,
    pub password_hash: String,
    pub created_at: String,
}

impl LedgerDocument for User {
    const KIND: EntityKind = EntityKind::User;

    fn ledger_id(&self) -> &str {
        &self.username
    }
}
