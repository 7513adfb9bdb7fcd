//! Port abstraction for resolving the invoking client's organization.

use crate::domain::OrgId;

use super::define_port_error;

define_port_error! {
    /// Failures raised while resolving the caller's identity.
    pub enum IdentityError {
        /// The identity source could not be consulted.
        Unavailable { message: String } => "identity source unavailable: {message}",
        /// The identity carries no organization attribute.
        MissingOrganization => "identity has no organization attribute",
    }
}

/// Resolves the organization of the client invoking the contract.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityResolver {
    /// Return the caller's organization identifier.
    fn resolve_caller_org(&self) -> Result<OrgId, IdentityError>;
}
