//! Domain primitives, policy evaluation and ledger services.
//!
//! Purpose: Define the case-management documents stored in the ledger, the
//! policy engine that guards them, and the services behind every contract
//! operation. The domain talks to infrastructure only through `ports`.
//!
//! Public surface:
//! - Error, ErrorCode: transport-agnostic failure value.
//! - EntityKind, LedgerKey, KeyRange: key namespacing per document type.
//! - Policy, Organization, User, Case, Record: stored documents.
//! - authorize, org_allowed, role_allowed: pure policy evaluation.
//! - EntityRepository, AccessControl: persistence and access helpers.
//! - PolicyService, OrganizationService, UserService, CaseService,
//!   RecordService: one per document family.

pub mod document;
pub mod error;
pub mod ports;

mod access_control;
mod authorization;
mod caller;
mod case;
mod case_service;
#[cfg(feature = "ledger-fixtures")]
mod fixture_seeding;
mod keys;
mod organization;
mod organization_service;
mod policy;
mod policy_service;
mod record;
mod record_service;
mod record_update;
mod repository;
#[cfg(test)]
pub(crate) mod test_support;
mod user;
mod user_service;

pub use self::access_control::{AccessControl, access_denied};
pub use self::authorization::{WILDCARD, authorize, org_allowed, role_allowed};
pub use self::caller::{CallerRole, InvocationContext, OrgId};
pub use self::case::{Case, INITIAL_CASE_STATUS};
pub use self::case_service::{CaseService, CreateCaseRequest};
pub use self::document::LedgerDocument;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
#[cfg(feature = "ledger-fixtures")]
pub use self::fixture_seeding::{
    FixtureSeedOutcome, FixtureSeeder, FixtureSeedingError, SEEDED_PASSWORD_HASH,
};
pub use self::keys::{EntityKind, KeyRange, LedgerKey};
pub use self::organization::Organization;
pub use self::organization_service::OrganizationService;
pub use self::policy::{CREATED_AT_PLACEHOLDER, Policy};
pub use self::policy_service::{CreatePolicyRequest, EncodedList, PolicyService};
pub use self::record::Record;
pub use self::record_service::{CreateRecordRequest, RecordService};
pub use self::record_update::RecordMetadataUpdate;
pub use self::repository::{Deletable, EntityRepository};
pub use self::user::User;
pub use self::user_service::{CreateUserRequest, UserService};
