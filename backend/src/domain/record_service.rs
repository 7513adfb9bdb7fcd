//! Evidence record writes and access-checked record queries.

use crate::domain::ports::LedgerStore;
use crate::domain::{
    AccessControl, CallerRole, EntityRepository, Error, InvocationContext, Record,
    RecordMetadataUpdate,
};

/// Arguments for [`RecordService::create_record`].
///
/// Neither the case reference nor the policy reference is validated.
#[derive(Debug, Clone, Default)]
pub struct CreateRecordRequest {
    pub id: String,
    pub case_id: String,
    pub record_type: String,
    pub file_hash: String,
    pub off_chain_uri: String,
    pub owner_org: String,
    pub created_at: String,
    pub policy_id: Option<String>,
    pub description: String,
}

/// Creates, reads, lists and updates records.
pub struct RecordService<'s, S: ?Sized> {
    repository: EntityRepository<'s, S>,
    access: AccessControl<'s, S>,
}

impl<'s, S> RecordService<'s, S>
where
    S: LedgerStore + ?Sized,
{
    pub fn new(repository: EntityRepository<'s, S>) -> Self {
        Self {
            repository,
            access: AccessControl::new(repository),
        }
    }

    pub fn create_record(&self, request: CreateRecordRequest) -> Result<(), Error> {
        let record = Record {
            id: request.id,
            case_id: request.case_id,
            record_type: request.record_type,
            file_hash: request.file_hash,
            off_chain_uri: request.off_chain_uri,
            owner_org: request.owner_org,
            created_at: request.created_at,
            policy_id: request.policy_id,
            description: request.description,
        };
        self.repository.create(&record)?;
        tracing::info!(record_id = %record.id, case_id = %record.case_id, "record created");
        Ok(())
    }

    /// Read one record.
    ///
    /// A record without a policy is never returned: reading it fails with
    /// `AccessDenied`.
    pub fn query_record(
        &self,
        context: &InvocationContext,
        record_id: &str,
        role: &CallerRole,
    ) -> Result<Record, Error> {
        let record: Record = self.repository.get(record_id)?;
        let org = context.caller_org()?;
        let Some(policy_id) = record.policy_id.as_deref() else {
            return Err(Error::access_denied(format!(
                "record {record_id} has no associated policy"
            )));
        };
        self.access.require_authorized(policy_id, org, role)?;
        Ok(record)
    }

    /// Records of `case_id` whose policy admits the caller's organization.
    pub fn query_records_by_case(
        &self,
        context: &InvocationContext,
        case_id: &str,
    ) -> Result<Vec<Record>, Error> {
        self.visible_records(context, |record| record.case_id == case_id)
    }

    /// Every record whose policy admits the caller's organization.
    ///
    /// `search` is accepted for compatibility and ignored.
    pub fn query_records(
        &self,
        context: &InvocationContext,
        search: &str,
    ) -> Result<Vec<Record>, Error> {
        if !search.is_empty() {
            tracing::warn!(search, "record search is not supported; returning all visible records");
        }
        self.visible_records(context, |_| true)
    }

    /// Scanned records passing `select`, then the caller's policy check.
    ///
    /// `select` runs first so unrelated records never cost a policy read.
    fn visible_records(
        &self,
        context: &InvocationContext,
        select: impl Fn(&Record) -> bool,
    ) -> Result<Vec<Record>, Error> {
        let records = self.repository.scan::<Record>()?;
        let org = context.caller_org()?;
        Ok(records
            .into_iter()
            .filter(|record| select(record) && self.access.record_visible(record, org))
            .collect())
    }

    /// Merge the recognized fields of `encoded_update` into a stored record.
    ///
    /// The record must exist before the update is decoded.
    pub fn update_record_metadata(&self, record_id: &str, encoded_update: &str) -> Result<(), Error> {
        let mut record: Record = self.repository.get(record_id)?;
        let update = RecordMetadataUpdate::from_json(encoded_update)?;
        if !record.apply(&update) {
            tracing::debug!(record_id, "metadata update carried no recognized fields");
        }
        self.repository.put(&record)?;
        tracing::info!(record_id, "record metadata updated");
        Ok(())
    }
}

#[cfg(test)]
#[path = "record_service_tests.rs"]
mod tests;
