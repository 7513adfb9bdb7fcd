//! Fixture registry types and JSON parsing.
//!
//! The registry names the organizations to provision, the roles their
//! members may hold, and the seeds that drive deterministic generation.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A validated fixture registry.
///
/// # Example
///
/// ```
/// use ledger_fixtures::FixtureRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "roles": ["investigator"],
///     "organizations": [{"orgId": "OrgA", "name": "Northshire Police", "mspId": "Org1MSP", "emailDomain": "northshire.example"}],
///     "seeds": [{"name": "test", "seed": 42, "membersPerOrganization": 2}]
/// }"#;
///
/// let registry = FixtureRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.organizations().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRegistry {
    version: u32,
    roles: Vec<String>,
    organizations: Vec<OrganizationDefinition>,
    seeds: Vec<SeedDefinition>,
}

impl FixtureRegistry {
    /// Parses a fixture registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the JSON is malformed, the version is
    /// unsupported, an organization id is blank, repeated, or contains `:`,
    /// or the roles, organizations or seeds arrays are empty.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawFixtureRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a fixture registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawFixtureRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.organizations.is_empty() {
            return Err(RegistryError::EmptyOrganizations);
        }

        let mut seen = BTreeSet::new();
        let mut organizations = Vec::with_capacity(raw.organizations.len());
        for (index, org) in raw.organizations.into_iter().enumerate() {
            if org.org_id.trim().is_empty() || org.org_id.contains(':') {
                return Err(RegistryError::InvalidOrganizationId {
                    index,
                    value: org.org_id,
                });
            }
            if !seen.insert(org.org_id.clone()) {
                return Err(RegistryError::DuplicateOrganization { org_id: org.org_id });
            }
            organizations.push(OrganizationDefinition {
                org_id: org.org_id,
                name: org.name,
                msp_id: org.msp_id,
                email_domain: org.email_domain,
            });
        }

        if raw.roles.is_empty() {
            return Err(RegistryError::EmptyRoles);
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                members_per_organization: s.members_per_organization,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            roles: raw.roles,
            organizations,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the roles members may be assigned.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns the organizations in registry order.
    #[must_use]
    pub fn organizations(&self) -> &[OrganizationDefinition] {
        &self.organizations
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// One organization to provision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationDefinition {
    org_id: String,
    name: String,
    msp_id: String,
    email_domain: String,
}

impl OrganizationDefinition {
    /// Returns the organization identifier used as the ledger key.
    #[must_use]
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the membership-service identifier.
    #[must_use]
    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    /// Returns the domain used for generated member emails.
    #[must_use]
    pub fn email_domain(&self) -> &str {
        &self.email_domain
    }
}

/// A named seed definition for deterministic member generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    members_per_organization: usize,
}

impl SeedDefinition {
    /// Creates a seed definition.
    #[must_use]
    pub const fn new(name: String, seed: u64, members_per_organization: usize) -> Self {
        Self {
            name,
            seed,
            members_per_organization,
        }
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns how many members each organization receives.
    #[must_use]
    pub const fn members_per_organization(&self) -> usize {
        self.members_per_organization
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFixtureRegistry {
    version: u32,
    roles: Vec<String>,
    organizations: Vec<RawOrganizationDefinition>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOrganizationDefinition {
    org_id: String,
    name: String,
    msp_id: String,
    email_domain: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    members_per_organization: usize,
}
