//! Case lifecycle and access-checked case queries.

use crate::domain::ports::LedgerStore;
use crate::domain::{
    AccessControl, CREATED_AT_PLACEHOLDER, CallerRole, Case, EntityRepository, Error,
    INITIAL_CASE_STATUS, InvocationContext, org_allowed,
};

/// Arguments for [`CaseService::create_case`].
#[derive(Debug, Clone, Default)]
pub struct CreateCaseRequest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub jurisdiction: String,
    pub case_type: String,
    pub policy_id: Option<String>,
}

/// Creates, reads, lists and deletes cases.
pub struct CaseService<'s, S: ?Sized> {
    repository: EntityRepository<'s, S>,
    access: AccessControl<'s, S>,
}

impl<'s, S> CaseService<'s, S>
where
    S: LedgerStore + ?Sized,
{
    pub fn new(repository: EntityRepository<'s, S>) -> Self {
        Self {
            repository,
            access: AccessControl::new(repository),
        }
    }

    /// Open a new case owned by the caller's organization.
    ///
    /// When a policy is named it must exist and admit the caller's
    /// organization. Role plays no part in admission.
    pub fn create_case(
        &self,
        context: &InvocationContext,
        request: CreateCaseRequest,
    ) -> Result<(), Error> {
        self.repository.ensure_absent::<Case>(&request.id)?;
        let policy = request
            .policy_id
            .as_deref()
            .map(|policy_id| self.access.load_policy(policy_id))
            .transpose()?;
        let org = context.caller_org()?;
        if let (Some(policy_id), Some(policy)) = (request.policy_id.as_deref(), &policy) {
            if !org_allowed(policy, org) {
                return Err(Error::access_denied(format!(
                    "organization {org} not allowed by policy {policy_id}"
                )));
            }
        }

        let case = Case {
            id: request.id,
            title: request.title,
            description: request.description,
            status: INITIAL_CASE_STATUS.to_owned(),
            jurisdiction: request.jurisdiction,
            case_type: request.case_type,
            created_by: org.to_string(),
            created_at: CREATED_AT_PLACEHOLDER.to_owned(),
            organization: org.to_string(),
            policy_id: request.policy_id,
        };
        self.repository.put(&case)?;
        tracing::info!(case_id = %case.id, organization = %case.organization, "case created");
        Ok(())
    }

    /// Read one case, enforcing its policy when it has one.
    pub fn query_case(
        &self,
        context: &InvocationContext,
        case_id: &str,
        role: &CallerRole,
    ) -> Result<Case, Error> {
        let case: Case = self.repository.get(case_id)?;
        if let Some(policy_id) = case.policy_id.as_deref() {
            let org = context.caller_org()?;
            self.access.require_authorized(policy_id, org, role)?;
        }
        Ok(case)
    }

    /// Every case visible to the caller, in key order.
    ///
    /// `filter` is accepted for compatibility and ignored.
    pub fn query_all_cases(
        &self,
        context: &InvocationContext,
        filter: &str,
        role: &CallerRole,
    ) -> Result<Vec<Case>, Error> {
        if !filter.is_empty() {
            tracing::warn!(filter, "case filters are not supported; returning all visible cases");
        }
        let cases = self.repository.scan::<Case>()?;
        let org = context.caller_org()?;
        Ok(cases
            .into_iter()
            .filter(|case| self.access.case_visible(case, org, role))
            .collect())
    }

    /// Remove a case. No policy check is made.
    pub fn delete_case(&self, case_id: &str) -> Result<(), Error> {
        self.repository.delete::<Case>(case_id)?;
        tracing::info!(case_id, "case deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "case_service_tests.rs"]
mod tests;
