//! Configuration-backed caller identity.

use crate::domain::OrgId;
use crate::domain::ports::{IdentityError, IdentityResolver};

/// Resolves every caller to one configured organization.
///
/// A missing or blank organization resolves to
/// [`IdentityError::MissingOrganization`].
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    org: Option<String>,
}

impl StaticIdentityResolver {
    /// Resolver for the given organization, if any.
    pub fn new(org: Option<String>) -> Self {
        Self { org }
    }
}

impl IdentityResolver for StaticIdentityResolver {
    fn resolve_caller_org(&self) -> Result<OrgId, IdentityError> {
        match self.org.as_deref().map(str::trim) {
            Some(org) if !org.is_empty() => Ok(OrgId::new(org)),
            _ => Err(IdentityError::missing_organization()),
        }
    }
}
