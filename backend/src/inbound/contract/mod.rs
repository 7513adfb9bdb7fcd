//! String-typed contract surface.
//!
//! [`Contract::invoke`] takes an operation name and positional string
//! arguments, the shape every ledger client speaks, and routes them to the
//! domain services. Results are JSON values so any transport can relay them.

mod operation;

use serde_json::Value;

use crate::domain::document::{policy_ref, to_payload};
use crate::domain::ports::LedgerStore;
use crate::domain::{
    CallerRole, CaseService, CreateCaseRequest, CreatePolicyRequest, CreateRecordRequest,
    CreateUserRequest, EncodedList, EntityRepository, Error, InvocationContext, LedgerDocument,
    OrganizationService, PolicyService, RecordService, UserService,
};

pub use operation::Operation;

/// Successful result of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractResponse {
    /// Write operations return nothing.
    Empty,
    /// An entity or list of entities.
    Payload(Value),
}

impl ContractResponse {
    /// JSON body, if the operation produced one.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Empty => None,
            Self::Payload(value) => Some(value),
        }
    }

    fn entity<D: LedgerDocument>(document: &D) -> Result<Self, Error> {
        to_payload(document).map(Self::Payload)
    }

    fn entities<D: LedgerDocument>(documents: &[D]) -> Result<Self, Error> {
        documents
            .iter()
            .map(to_payload)
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Self::Payload(Value::Array(items)))
    }
}

/// Dispatches invocations against one ledger store.
pub struct Contract<'s, S: ?Sized> {
    repository: EntityRepository<'s, S>,
}

impl<'s, S> Contract<'s, S>
where
    S: LedgerStore + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self {
            repository: EntityRepository::new(store),
        }
    }

    /// Run `function` with `args` on behalf of the caller in `context`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unknown name or a wrong argument count;
    /// otherwise whatever the operation itself reports.
    pub fn invoke(
        &self,
        context: &InvocationContext,
        function: &str,
        args: &[String],
    ) -> Result<ContractResponse, Error> {
        let operation = Operation::parse(function)?;
        tracing::debug!(%operation, args = args.len(), "invoking");
        self.dispatch(context, operation, args)
    }

    fn dispatch(
        &self,
        context: &InvocationContext,
        operation: Operation,
        args: &[String],
    ) -> Result<ContractResponse, Error> {
        let policies = PolicyService::new(self.repository);
        let organizations = OrganizationService::new(self.repository);
        let users = UserService::new(self.repository);
        let cases = CaseService::new(self.repository);
        let records = RecordService::new(self.repository);

        match (operation, args) {
            (Operation::CreatePolicy, [id, categories, orgs, roles]) => {
                let request = CreatePolicyRequest {
                    policy_id: id.clone(),
                    categories: EncodedList::new("categories", categories.clone()),
                    allowed_orgs: EncodedList::new("allowedOrgs", orgs.clone()),
                    allowed_roles: EncodedList::new("allowedRoles", roles.clone()),
                };
                policies.create_policy(context, request)?;
                Ok(ContractResponse::Empty)
            }
            (Operation::QueryPolicy, [id]) => ContractResponse::entity(&policies.query_policy(id)?),
            (Operation::QueryAllPolicies, []) => {
                ContractResponse::entities(&policies.query_all_policies()?)
            }
            (Operation::QueryAllOrganizations, []) => {
                ContractResponse::entities(&organizations.query_all_organizations()?)
            }
            (Operation::QueryOrganization, [id]) => {
                ContractResponse::entity(&organizations.query_organization(id)?)
            }
            (Operation::QueryOrganizationMembers, [id]) => {
                let members = organizations.query_organization_members(id)?;
                Ok(ContractResponse::Payload(Value::from(members)))
            }
            (
                Operation::CreateUser,
                [username, full_name, email, role, organization, password_hash],
            ) => {
                users.create_user(CreateUserRequest {
                    username: username.clone(),
                    full_name: full_name.clone(),
                    email: email.clone(),
                    role: role.clone(),
                    organization: organization.clone(),
                    password_hash: password_hash.clone(),
                })?;
                Ok(ContractResponse::Empty)
            }
            (Operation::QueryUser, [username]) => {
                ContractResponse::entity(&users.query_user(username)?)
            }
            (
                Operation::CreateCase,
                [id, title, description, jurisdiction, case_type, policy_id],
            ) => {
                let request = CreateCaseRequest {
                    id: id.clone(),
                    title: title.clone(),
                    description: description.clone(),
                    jurisdiction: jurisdiction.clone(),
                    case_type: case_type.clone(),
                    policy_id: policy_ref(policy_id),
                };
                cases.create_case(context, request)?;
                Ok(ContractResponse::Empty)
            }
            (Operation::QueryCase, [id, role]) => {
                let role = CallerRole::new(role.clone());
                ContractResponse::entity(&cases.query_case(context, id, &role)?)
            }
            (Operation::QueryAllCases, [filter, role]) => {
                let role = CallerRole::new(role.clone());
                ContractResponse::entities(&cases.query_all_cases(context, filter, &role)?)
            }
            (Operation::DeleteCase, [id]) => {
                cases.delete_case(id)?;
                Ok(ContractResponse::Empty)
            }
            (
                Operation::CreateRecord,
                [
                    id,
                    case_id,
                    record_type,
                    file_hash,
                    off_chain_uri,
                    owner_org,
                    created_at,
                    policy_id,
                    description,
                ],
            ) => {
                records.create_record(CreateRecordRequest {
                    id: id.clone(),
                    case_id: case_id.clone(),
                    record_type: record_type.clone(),
                    file_hash: file_hash.clone(),
                    off_chain_uri: off_chain_uri.clone(),
                    owner_org: owner_org.clone(),
                    created_at: created_at.clone(),
                    policy_id: policy_ref(policy_id),
                    description: description.clone(),
                })?;
                Ok(ContractResponse::Empty)
            }
            (Operation::QueryRecord, [id, role]) => {
                let role = CallerRole::new(role.clone());
                ContractResponse::entity(&records.query_record(context, id, &role)?)
            }
            (Operation::QueryRecordsByCase, [case_id]) => {
                ContractResponse::entities(&records.query_records_by_case(context, case_id)?)
            }
            (Operation::QueryRecords, [search]) => {
                ContractResponse::entities(&records.query_records(context, search)?)
            }
            (Operation::UpdateRecordMetadata, [id, update]) => {
                records.update_record_metadata(id, update)?;
                Ok(ContractResponse::Empty)
            }
            (operation, args) => Err(Error::invalid_input(format!(
                "{operation} expects {} arguments, got {}",
                operation.arity(),
                args.len()
            ))),
        }
    }
}
