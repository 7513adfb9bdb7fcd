//! Deterministic member generation from seed definitions.
//!
//! One RNG, seeded from the seed definition, is threaded through every
//! organization in registry order, so the same registry and seed always
//! produce identical members.

use std::collections::BTreeSet;

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::{FixtureRegistry, OrganizationDefinition, SeedDefinition};
use crate::seed::{MemberSeed, OrganizationSeed};
use crate::validation::{USERNAME_MAX, is_valid_username, sanitize_username};

/// Maximum number of attempts to generate a unique, valid username.
const MAX_USERNAME_ATTEMPTS: usize = 100;

/// Generates every registry organization with seeded members.
///
/// Usernames are unique across the whole run and valid per
/// [`is_valid_username`](crate::is_valid_username). Roles are drawn
/// uniformly from the registry.
///
/// # Errors
///
/// Returns [`GenerationError`] if the registry has no roles or a unique
/// username cannot be produced within the retry budget.
///
/// # Example
///
/// ```
/// use ledger_fixtures::{FixtureRegistry, generate_organization_fixtures};
///
/// let json = r#"{
///     "version": 1,
///     "roles": ["clerk"],
///     "organizations": [{"orgId": "OrgA", "name": "A", "mspId": "Org1MSP", "emailDomain": "a.example"}],
///     "seeds": [{"name": "test", "seed": 42, "membersPerOrganization": 3}]
/// }"#;
///
/// let registry = FixtureRegistry::from_json(json).expect("valid");
/// let seed = registry.find_seed("test").expect("found");
/// let first = generate_organization_fixtures(&registry, seed).expect("generated");
/// let second = generate_organization_fixtures(&registry, seed).expect("generated");
/// assert_eq!(first, second);
/// ```
pub fn generate_organization_fixtures(
    registry: &FixtureRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<OrganizationSeed>, GenerationError> {
    if registry.roles().is_empty() {
        return Err(GenerationError::NoRoles);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut taken = BTreeSet::new();
    let mut organizations = Vec::with_capacity(registry.organizations().len());

    for org in registry.organizations() {
        let mut members = Vec::with_capacity(seed_def.members_per_organization());
        for _ in 0..seed_def.members_per_organization() {
            members.push(generate_member(&mut rng, registry.roles(), org, &mut taken)?);
        }
        organizations.push(OrganizationSeed {
            org_id: org.org_id().to_owned(),
            name: org.name().to_owned(),
            msp_id: org.msp_id().to_owned(),
            members,
        });
    }

    Ok(organizations)
}

fn generate_member(
    rng: &mut ChaCha8Rng,
    roles: &[String],
    org: &OrganizationDefinition,
    taken: &mut BTreeSet<String>,
) -> Result<MemberSeed, GenerationError> {
    for _ in 0..MAX_USERNAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let username: String = sanitize_username(&format!("{first}.{last}"))
            .chars()
            .take(USERNAME_MAX)
            .collect();

        if !is_valid_username(&username) || taken.contains(&username) {
            continue;
        }

        let role = pick_role(rng, roles)?;
        taken.insert(username.clone());
        return Ok(MemberSeed {
            email: format!("{username}@{}", org.email_domain()),
            full_name: format!("{first} {last}"),
            username,
            role,
        });
    }

    Err(GenerationError::UsernameGenerationFailed {
        max_attempts: MAX_USERNAME_ATTEMPTS,
    })
}

fn pick_role(rng: &mut ChaCha8Rng, roles: &[String]) -> Result<String, GenerationError> {
    let index = rng.random_range(0..roles.len());
    roles.get(index).cloned().ok_or(GenerationError::NoRoles)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;

    const TEST_REGISTRY_JSON: &str = r#"{
        "version": 1,
        "roles": ["investigator", "forensic_analyst", "prosecutor", "clerk"],
        "organizations": [
            {"orgId": "OrgA", "name": "Northshire Police", "mspId": "Org1MSP", "emailDomain": "northshire.example"},
            {"orgId": "OrgB", "name": "Southvale Forensics", "mspId": "Org2MSP", "emailDomain": "southvale.example"},
            {"orgId": "OrgC", "name": "Crown Prosecution", "mspId": "Org3MSP", "emailDomain": "crown.example"}
        ],
        "seeds": [
            {"name": "big", "seed": 42, "membersPerOrganization": 8},
            {"name": "other", "seed": 43, "membersPerOrganization": 8},
            {"name": "empty", "seed": 1, "membersPerOrganization": 0}
        ]
    }"#;

    #[fixture]
    fn registry() -> FixtureRegistry {
        FixtureRegistry::from_json(TEST_REGISTRY_JSON).expect("valid test registry")
    }

    fn generate(registry: &FixtureRegistry, name: &str) -> Vec<OrganizationSeed> {
        let seed = registry.find_seed(name).expect("seed found");
        generate_organization_fixtures(registry, seed).expect("generated")
    }

    #[rstest]
    fn generates_every_organization_in_order(registry: FixtureRegistry) {
        let ids: Vec<String> = generate(&registry, "big")
            .into_iter()
            .map(|org| org.org_id)
            .collect();
        assert_eq!(ids, ["OrgA", "OrgB", "OrgC"]);
    }

    #[rstest]
    fn generation_is_deterministic(registry: FixtureRegistry) {
        assert_eq!(generate(&registry, "big"), generate(&registry, "big"));
    }

    #[rstest]
    fn different_seeds_produce_different_members(registry: FixtureRegistry) {
        assert_ne!(generate(&registry, "big"), generate(&registry, "other"));
    }

    #[rstest]
    fn usernames_are_valid_and_unique_across_orgs(registry: FixtureRegistry) {
        let members: Vec<MemberSeed> = generate(&registry, "big")
            .into_iter()
            .flat_map(|org| org.members)
            .collect();
        let unique: HashSet<&str> = members.iter().map(|m| m.username.as_str()).collect();

        assert_eq!(members.len(), 24);
        assert_eq!(unique.len(), members.len());
        assert!(members.iter().all(|m| is_valid_username(&m.username)));
    }

    #[rstest]
    fn emails_use_the_organization_domain(registry: FixtureRegistry) {
        for org in generate(&registry, "big") {
            let domain = match org.org_id.as_str() {
                "OrgA" => "@northshire.example",
                "OrgB" => "@southvale.example",
                _ => "@crown.example",
            };
            assert!(org.members.iter().all(|m| m.email.ends_with(domain)));
        }
    }

    #[rstest]
    fn roles_come_from_the_registry(registry: FixtureRegistry) {
        let roles: HashSet<&str> = registry.roles().iter().map(String::as_str).collect();
        for org in generate(&registry, "big") {
            assert!(org.members.iter().all(|m| roles.contains(m.role.as_str())));
        }
    }

    #[rstest]
    fn zero_members_yields_empty_organizations(registry: FixtureRegistry) {
        let orgs = generate(&registry, "empty");
        assert_eq!(orgs.len(), 3);
        assert!(orgs.iter().all(|org| org.members.is_empty()));
    }
}
