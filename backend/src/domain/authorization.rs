//! Policy evaluation.
//!
//! A caller is admitted when both axes admit it: its organization appears in
//! `allowedOrgs` (or the list holds `"*"`) and its role appears in
//! `allowedRoles` (or that list holds `"*"`). An empty list denies its axis.
//! Matching is exact string equality.

use crate::domain::{CallerRole, OrgId, Policy};

/// Entry matching any organization or role.
pub const WILDCARD: &str = "*";

fn admits(allowed: &[String], candidate: &str) -> bool {
    allowed
        .iter()
        .any(|entry| entry == candidate || entry == WILDCARD)
}

/// Organization axis only.
///
/// Record listings carry no role and are filtered with this check alone.
pub fn org_allowed(policy: &Policy, org: &OrgId) -> bool {
    admits(&policy.allowed_orgs, org.as_str())
}

/// Role axis only.
pub fn role_allowed(policy: &Policy, role: &CallerRole) -> bool {
    admits(&policy.allowed_roles, role.as_str())
}

/// Full evaluation over both axes.
///
/// # Examples
/// ```
/// use cdms::domain::{authorize, CallerRole, OrgId, Policy};
///
/// let policy = Policy {
///     allowed_orgs: vec!["OrgA".into()],
///     allowed_roles: vec!["*".into()],
///     ..Policy::default()
/// };
/// assert!(authorize(&policy, &OrgId::new("OrgA"), &CallerRole::new("clerk")));
/// assert!(!authorize(&policy, &OrgId::new("OrgB"), &CallerRole::new("clerk")));
/// ```
pub fn authorize(policy: &Policy, org: &OrgId, role: &CallerRole) -> bool {
    org_allowed(policy, org) && role_allowed(policy, role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn policy(orgs: &[&str], roles: &[&str]) -> Policy {
        Policy {
            policy_id: "P1".to_owned(),
            allowed_orgs: orgs.iter().map(|org| (*org).to_owned()).collect(),
            allowed_roles: roles.iter().map(|role| (*role).to_owned()).collect(),
            ..Policy::default()
        }
    }

    #[rstest]
    #[case(&["OrgA"], &["investigator"], "OrgA", "investigator", true)]
    #[case(&["OrgA"], &["investigator"], "OrgB", "investigator", false)]
    #[case(&["OrgA"], &["investigator"], "OrgA", "clerk", false)]
    #[case(&["*"], &["investigator"], "OrgZ", "investigator", true)]
    #[case(&["OrgA"], &["*"], "OrgA", "anyone", true)]
    #[case(&["*"], &["*"], "", "", true)]
    #[case(&[], &["*"], "OrgA", "clerk", false)]
    #[case(&["*"], &[], "OrgA", "clerk", false)]
    #[case(&["orga"], &["*"], "OrgA", "clerk", false)]
    #[case(&["OrgB", "OrgA"], &["clerk", "judge"], "OrgA", "judge", true)]
    fn authorize_requires_both_axes(
        #[case] orgs: &[&str],
        #[case] roles: &[&str],
        #[case] org: &str,
        #[case] role: &str,
        #[case] expected: bool,
    ) {
        let policy = policy(orgs, roles);
        assert_eq!(
            authorize(&policy, &OrgId::new(org), &CallerRole::new(role)),
            expected
        );
    }

    #[rstest]
    fn org_check_ignores_roles() {
        let policy = policy(&["OrgA"], &[]);
        assert!(org_allowed(&policy, &OrgId::new("OrgA")));
        assert!(!authorize(&policy, &OrgId::new("OrgA"), &CallerRole::new("clerk")));
    }

    #[rstest]
    #[case("OrgA", "clerk")]
    #[case("OrgB", "judge")]
    #[case("", "")]
    fn adding_wildcards_never_revokes(#[case] org: &str, #[case] role: &str) {
        let org = OrgId::new(org);
        let role = CallerRole::new(role);
        for (orgs, roles) in [
            (vec!["OrgA"], vec!["clerk"]),
            (vec![], vec!["judge"]),
            (vec!["OrgB"], vec![]),
        ] {
            let base = policy(&orgs, &roles);
            let mut widened = base.clone();
            widened.allowed_orgs.push(WILDCARD.to_owned());
            widened.allowed_roles.push(WILDCARD.to_owned());

            if authorize(&base, &org, &role) {
                assert!(authorize(&widened, &org, &role));
            }
            assert!(authorize(&widened, &org, &role));
        }
    }

    #[rstest]
    fn list_order_is_irrelevant() {
        let forward = policy(&["OrgA", "OrgB"], &["clerk", "judge"]);
        let reverse = policy(&["OrgB", "OrgA"], &["judge", "clerk"]);
        for org in ["OrgA", "OrgB", "OrgC"] {
            for role in ["clerk", "judge", "guest"] {
                let (org, role) = (OrgId::new(org), CallerRole::new(role));
                assert_eq!(authorize(&forward, &org, &role), authorize(&reverse, &org, &role));
            }
        }
    }
}
