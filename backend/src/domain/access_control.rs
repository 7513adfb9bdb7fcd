//! Policy checks applied on top of repository reads.
//!
//! Single-entity reads fail loudly: an unreadable policy or a denial aborts
//! the read. Listings degrade instead: an item whose policy cannot be read is
//! dropped from the result with a warning.

use crate::domain::ports::LedgerStore;
use crate::domain::{
    authorize, org_allowed, CallerRole, Case, EntityRepository, Error, OrgId, Policy, Record,
};

/// Denial message carrying only the caller's identifiers.
pub fn access_denied(org: &OrgId, role: &CallerRole) -> Error {
    Error::access_denied(format!(
        "access denied by policy for organization {org} and role {role}"
    ))
}

/// Evaluates stored policies for the entities that reference them.
pub struct AccessControl<'s, S: ?Sized> {
    repository: EntityRepository<'s, S>,
}

impl<'s, S> AccessControl<'s, S>
where
    S: LedgerStore + ?Sized,
{
    /// Build a checker reading policies through `repository`.
    pub fn new(repository: EntityRepository<'s, S>) -> Self {
        Self { repository }
    }

    /// Fetch a referenced policy, keeping the failure's code.
    pub fn load_policy(&self, policy_id: &str) -> Result<Policy, Error> {
        self.repository
            .get::<Policy>(policy_id)
            .map_err(|err| err.with_context(format!("failed to get policy {policy_id}")))
    }

    /// Require both axes of `policy_id` to admit the caller.
    pub fn require_authorized(
        &self,
        policy_id: &str,
        org: &OrgId,
        role: &CallerRole,
    ) -> Result<(), Error> {
        let policy = self.load_policy(policy_id)?;
        if authorize(&policy, org, role) {
            Ok(())
        } else {
            Err(access_denied(org, role))
        }
    }

    /// Whether a listed case is visible to the caller.
    ///
    /// Cases without a policy are always visible.
    pub fn case_visible(&self, case: &Case, org: &OrgId, role: &CallerRole) -> bool {
        let Some(policy_id) = case.policy_id.as_deref() else {
            return true;
        };
        match self.load_policy(policy_id) {
            Ok(policy) => authorize(&policy, org, role),
            Err(error) => {
                tracing::warn!(case_id = %case.id, policy_id, %error, "skipping case with unreadable policy");
                false
            }
        }
    }

    /// Whether a listed record is visible to the caller's organization.
    ///
    /// Records without a policy are never listed. Role is not consulted.
    pub fn record_visible(&self, record: &Record, org: &OrgId) -> bool {
        let Some(policy_id) = record.policy_id.as_deref() else {
            return false;
        };
        match self.load_policy(policy_id) {
            Ok(policy) => org_allowed(&policy, org),
            Err(error) => {
                tracing::warn!(record_id = %record.id, policy_id, %error, "skipping record with unreadable policy");
                false
            }
        }
    }
}
