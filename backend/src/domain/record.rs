//! Evidence record documents.

use serde::{Deserialize, Serialize};

use crate::domain::document::policy_reference;
use crate::domain::{EntityKind, LedgerDocument, RecordMetadataUpdate};

/// Metadata for an off-ledger artifact attached to a case.
///
/// The case reference and policy reference are not validated when the
/// record is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub id: String,
    pub case_id: String,
    pub record_type: String,
    /// Content hash of the off-ledger artifact.
    pub file_hash: String,
    pub off_chain_uri: String,
    pub owner_org: String,
    /// Caller-supplied and stored verbatim.
    pub created_at: String,
    #[serde(with = "policy_reference")]
    pub policy_id: Option<String>,
    pub description: String,
}

impl Record {
    /// Apply every present field of `update`, leaving the rest untouched.
    ///
    /// Returns `true` when at least one field was present.
    pub fn apply(&mut self, update: &RecordMetadataUpdate) -> bool {
        let mut touched = false;
        if let Some(policy_id) = &update.policy_id {
            self.policy_id = crate::domain::document::policy_ref(policy_id);
            touched = true;
        }
        if let Some(record_type) = &update.record_type {
            self.record_type.clone_from(record_type);
            touched = true;
        }
        if let Some(owner_org) = &update.owner_org {
            self.owner_org.clone_from(owner_org);
            touched = true;
        }
        if let Some(description) = &update.description {
            self.description.clone_from(description);
            touched = true;
        }
        touched
    }
}

impl LedgerDocument for Record {
    const KIND: EntityKind = EntityKind::Record;

    fn ledger_id(&self) -> &str {
        &self.id
    }
}
