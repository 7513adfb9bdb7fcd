//! Fixture seeding orchestration.
//!
//! Converts deterministic `ledger-fixtures` output into organization and user
//! documents and writes each one with an existence check, so seeding twice
//! changes nothing.

use ledger_fixtures::{
    FixtureRegistry, GenerationError, OrganizationSeed, RegistryError,
    generate_organization_fixtures,
};
use thiserror::Error;

use crate::domain::ports::LedgerStore;
use crate::domain::{
    CREATED_AT_PLACEHOLDER, EntityRepository, Error, ErrorCode, LedgerDocument, Organization, User,
};

/// Password hash stored for seeded members; matches no real password.
pub const SEEDED_PASSWORD_HASH: &str = "!";

/// Result of applying one named seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSeedOutcome {
    /// Seed name that was applied.
    pub seed_name: String,
    /// Organizations written by this run.
    pub organizations_created: usize,
    /// Organizations already present and left untouched.
    pub organizations_existing: usize,
    /// Users written by this run.
    pub users_created: usize,
    /// Users already present and left untouched.
    pub users_existing: usize,
}

/// Errors raised while preparing or applying fixtures.
#[derive(Debug, Error)]
pub enum FixtureSeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Member generation failed.
    #[error("fixture generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// Writing to the ledger failed.
    #[error("fixture persistence error: {0}")]
    Persistence(#[from] Error),
}

enum Written {
    Created,
    Existing,
}

/// Writes generated organizations and members into a ledger.
pub struct FixtureSeeder<'s, S: ?Sized> {
    repository: EntityRepository<'s, S>,
}

impl<'s, S> FixtureSeeder<'s, S>
where
    S: LedgerStore + ?Sized,
{
    pub fn new(repository: EntityRepository<'s, S>) -> Self {
        Self { repository }
    }

    /// Apply the seed named `seed_name` from `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureSeedingError`] if the seed is unknown, generation
    /// fails, or a ledger write fails.
    pub fn seed_from_registry(
        &self,
        registry: &FixtureRegistry,
        seed_name: &str,
    ) -> Result<FixtureSeedOutcome, FixtureSeedingError> {
        let seed = registry.find_seed(seed_name)?;
        let organizations = generate_organization_fixtures(registry, seed)?;

        let mut outcome = FixtureSeedOutcome {
            seed_name: seed.name().to_owned(),
            ..FixtureSeedOutcome::default()
        };
        for fixture in organizations {
            for user in member_users(&fixture) {
                match self.write_once(&user)? {
                    Written::Created => outcome.users_created += 1,
                    Written::Existing => outcome.users_existing += 1,
                }
            }
            match self.write_once(&organization(fixture))? {
                Written::Created => outcome.organizations_created += 1,
                Written::Existing => outcome.organizations_existing += 1,
            }
        }

        tracing::info!(
            seed = %outcome.seed_name,
            organizations_created = outcome.organizations_created,
            organizations_existing = outcome.organizations_existing,
            users_created = outcome.users_created,
            users_existing = outcome.users_existing,
            "fixtures applied"
        );
        Ok(outcome)
    }

    fn write_once<D: LedgerDocument>(&self, document: &D) -> Result<Written, Error> {
        match self.repository.create(document) {
            Ok(()) => Ok(Written::Created),
            Err(err) if err.code() == ErrorCode::AlreadyExists => {
                tracing::debug!(kind = %D::KIND, id = document.ledger_id(), "fixture kept");
                Ok(Written::Existing)
            }
            Err(err) => Err(err),
        }
    }
}

fn member_users(fixture: &OrganizationSeed) -> Vec<User> {
    fixture
        .members
        .iter()
        .map(|member| User {
            username: member.username.clone(),
            full_name: member.full_name.clone(),
            email: member.email.clone(),
            role: member.role.clone(),
            organization: fixture.org_id.clone(),
            password_hash: SEEDED_PASSWORD_HASH.to_owned(),
            created_at: CREATED_AT_PLACEHOLDER.to_owned(),
        })
        .collect()
}

fn organization(fixture: OrganizationSeed) -> Organization {
    let members = fixture.member_usernames();
    Organization {
        org_id: fixture.org_id,
        name: fixture.name,
        msp_id: fixture.msp_id,
        members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::MemoryStore;
    use rstest::{fixture, rstest};

    const REGISTRY: &str = r#"{
        "version": 1,
        "roles": ["investigator", "clerk"],
        "organizations": [
            {"orgId": "OrgA", "name": "Northshire Police", "mspId": "Org1MSP", "emailDomain": "northshire.example"},
            {"orgId": "OrgB", "name": "Southvale Forensics", "mspId": "Org2MSP", "emailDomain": "southvale.example"}
        ],
        "seeds": [{"name": "pair", "seed": 11, "membersPerOrganization": 2}]
    }"#;

    #[fixture]
    fn registry() -> FixtureRegistry {
        FixtureRegistry::from_json(REGISTRY).expect("valid registry")
    }

    #[rstest]
    fn first_run_creates_everything(registry: FixtureRegistry) {
        let store = MemoryStore::new();
        let seeder = FixtureSeeder::new(EntityRepository::new(&store));

        let outcome = seeder.seed_from_registry(&registry, "pair").expect("seeded");

        assert_eq!(outcome.organizations_created, 2);
        assert_eq!(outcome.users_created, 4);
        assert_eq!(store.len(), 6);

        let org: Organization = EntityRepository::new(&store).get("OrgA").expect("org stored");
        assert_eq!(org.members.len(), 2);
        for username in &org.members {
            let user: User = EntityRepository::new(&store).get(username).expect("member stored");
            assert_eq!(user.organization, "OrgA");
            assert_eq!(user.password_hash, SEEDED_PASSWORD_HASH);
        }
    }

    #[rstest]
    fn second_run_keeps_existing_entries(registry: FixtureRegistry) {
        let store = MemoryStore::new();
        let seeder = FixtureSeeder::new(EntityRepository::new(&store));
        seeder.seed_from_registry(&registry, "pair").expect("first run");
        let before = store.raw("org:OrgA");

        let outcome = seeder.seed_from_registry(&registry, "pair").expect("second run");

        assert_eq!(outcome.organizations_created, 0);
        assert_eq!(outcome.organizations_existing, 2);
        assert_eq!(outcome.users_existing, 4);
        assert_eq!(store.raw("org:OrgA"), before);
    }

    #[rstest]
    fn unknown_seed_is_a_registry_error(registry: FixtureRegistry) {
        let store = MemoryStore::new();
        let seeder = FixtureSeeder::new(EntityRepository::new(&store));

        let err = seeder
            .seed_from_registry(&registry, "missing")
            .expect_err("unknown seed");

        assert!(matches!(err, FixtureSeedingError::Registry(_)));
    }
}
