//! Policy creation and lookup.

use crate::domain::ports::LedgerStore;
use crate::domain::{
    CREATED_AT_PLACEHOLDER, EntityRepository, Error, InvocationContext, Policy,
};

/// A list argument still in its JSON text form.
///
/// Decoding is deferred so that an existence check runs before any argument
/// is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedList {
    argument: &'static str,
    encoded: String,
}

impl EncodedList {
    /// Wrap the JSON text supplied for `argument`.
    pub fn new(argument: &'static str, encoded: impl Into<String>) -> Self {
        Self {
            argument,
            encoded: encoded.into(),
        }
    }

    /// Decode a JSON array of strings; `null` is an empty list.
    pub fn decode(&self) -> Result<Vec<String>, Error> {
        serde_json::from_str::<Option<Vec<String>>>(&self.encoded)
            .map(Option::unwrap_or_default)
            .map_err(|err| {
                Error::invalid_input(format!("failed to unmarshal {}: {err}", self.argument))
            })
    }
}

/// Arguments for [`PolicyService::create_policy`].
#[derive(Debug, Clone)]
pub struct CreatePolicyRequest {
    pub policy_id: String,
    pub categories: EncodedList,
    pub allowed_orgs: EncodedList,
    pub allowed_roles: EncodedList,
}

/// Creates and reads access policies.
pub struct PolicyService<'s, S: ?Sized> {
    repository: EntityRepository<'s, S>,
}

impl<'s, S> PolicyService<'s, S>
where
    S: LedgerStore + ?Sized,
{
    pub fn new(repository: EntityRepository<'s, S>) -> Self {
        Self { repository }
    }

    /// Store a new policy created by the caller's organization.
    pub fn create_policy(
        &self,
        context: &InvocationContext,
        request: CreatePolicyRequest,
    ) -> Result<(), Error> {
        self.repository.ensure_absent::<Policy>(&request.policy_id)?;
        let categories = request.categories.decode()?;
        let allowed_orgs = request.allowed_orgs.decode()?;
        let allowed_roles = request.allowed_roles.decode()?;
        let org = context.caller_org()?;

        let policy = Policy {
            policy_id: request.policy_id,
            categories,
            allowed_orgs,
            allowed_roles,
            created_at: CREATED_AT_PLACEHOLDER.to_owned(),
            created_by: org.to_string(),
        };
        self.repository.put(&policy)?;
        tracing::info!(policy_id = %policy.policy_id, created_by = %policy.created_by, "policy created");
        Ok(())
    }

    pub fn query_policy(&self, policy_id: &str) -> Result<Policy, Error> {
        self.repository.get(policy_id)
    }

    /// Every policy, unfiltered, in key order.
    pub fn query_all_policies(&self) -> Result<Vec<Policy>, Error> {
        self.repository.scan()
    }
}
