//! Generated fixture types.
//!
//! These mirror the ledger's organization and user documents without
//! depending on them; the consumer converts at the point of use.

use serde::{Deserialize, Serialize};

/// A generated organization with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSeed {
    /// Organization identifier used as the ledger key.
    pub org_id: String,
    /// Display name.
    pub name: String,
    /// Membership-service identifier.
    pub msp_id: String,
    /// Generated members, in generation order.
    pub members: Vec<MemberSeed>,
}

impl OrganizationSeed {
    /// Usernames of every member, in generation order.
    #[must_use]
    pub fn member_usernames(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|member| member.username.clone())
            .collect()
    }
}

/// A generated organization member.
///
/// # Example
///
/// ```
/// use ledger_fixtures::MemberSeed;
///
/// let member = MemberSeed {
///     username: "ada.lovelace".to_owned(),
///     full_name: "Ada Lovelace".to_owned(),
///     email: "ada.lovelace@northshire.example".to_owned(),
///     role: "investigator".to_owned(),
/// };
/// assert_eq!(member.role, "investigator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSeed {
    /// Login name, unique across the whole generation run.
    pub username: String,
    /// Human-readable name.
    pub full_name: String,
    /// Contact address under the organization's email domain.
    pub email: String,
    /// Role drawn from the registry.
    pub role: String,
}
