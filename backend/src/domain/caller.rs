//! Caller identity carried through a single contract invocation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::ports::{IdentityError, IdentityResolver};

/// Organization identifier as reported by the identity layer.
///
/// Trusted verbatim: no normalization or validation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    /// Wrap an organization identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for OrgId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role asserted by the caller as an invocation argument.
///
/// The role is never checked against the stored user's role; the invoking
/// application is trusted to pass the right value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerRole(String);

impl CallerRole {
    /// Wrap a caller-asserted role.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the role.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CallerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-invocation context.
///
/// Identity is resolved once, up front, and the outcome is kept. Operations
/// that need the caller's organization call [`InvocationContext::caller_org`]
/// and fail with `IdentityResolutionFailure` when resolution did not succeed;
/// operations that do not need it never look.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    caller_org: Result<OrgId, IdentityError>,
}

impl InvocationContext {
    /// Resolve the caller through `resolver` and keep the outcome.
    pub fn resolve<R>(resolver: &R) -> Self
    where
        R: IdentityResolver + ?Sized,
    {
        let caller_org = resolver.resolve_caller_org();
        if let Err(error) = &caller_org {
            tracing::debug!(%error, "caller identity unresolved");
        }
        Self { caller_org }
    }

    /// Context for a caller whose organization is already known.
    pub fn for_org(org: impl Into<String>) -> Self {
        Self {
            caller_org: Ok(OrgId::new(org)),
        }
    }

    /// Context whose identity resolution failed.
    pub fn unresolved(error: IdentityError) -> Self {
        Self {
            caller_org: Err(error),
        }
    }

    /// The caller's organization, or `IdentityResolutionFailure`.
    pub fn caller_org(&self) -> Result<&OrgId, Error> {
        self.caller_org.as_ref().map_err(|err| Error::from(err.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockIdentityResolver;
    use rstest::rstest;

    #[rstest]
    fn resolve_keeps_successful_org() {
        let mut resolver = MockIdentityResolver::new();
        resolver
            .expect_resolve_caller_org()
            .times(1)
            .return_once(|| Ok(OrgId::new("OrgA")));

        let context = InvocationContext::resolve(&resolver);

        assert_eq!(context.caller_org().expect("org").as_str(), "OrgA");
    }

    #[rstest]
    fn resolve_defers_failure_until_org_is_needed() {
        let mut resolver = MockIdentityResolver::new();
        resolver
            .expect_resolve_caller_org()
            .times(1)
            .return_once(|| Err(IdentityError::unavailable("no certificate")));

        let context = InvocationContext::resolve(&resolver);
        let error = context.caller_org().expect_err("identity failure");

        assert_eq!(error.code(), ErrorCode::IdentityResolutionFailure);
        assert!(error.message().contains("no certificate"));
    }
}
