//! Deterministic organization and member fixtures for a case ledger.
//!
//! A versioned JSON registry names the participating organizations, the
//! roles members may hold, and one or more named seeds. Generating from a
//! seed always yields the same members, so seeding a ledger twice produces
//! identical keys. The crate is independent of the ledger's own types.
//!
//! # Example
//!
//! ```
//! use ledger_fixtures::{FixtureRegistry, generate_organization_fixtures};
//!
//! let json = r#"{
//!     "version": 1,
//!     "roles": ["investigator", "clerk"],
//!     "organizations": [
//!         {"orgId": "OrgA", "name": "Northshire Police", "mspId": "Org1MSP", "emailDomain": "northshire.example"}
//!     ],
//!     "seeds": [{"name": "harbour-watch", "seed": 7, "membersPerOrganization": 2}]
//! }"#;
//!
//! let registry = FixtureRegistry::from_json(json).expect("valid registry");
//! let seed = registry.find_seed("harbour-watch").expect("seed exists");
//! let organizations = generate_organization_fixtures(&registry, seed).expect("generated");
//!
//! assert_eq!(organizations.len(), 1);
//! assert_eq!(organizations[0].members.len(), 2);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_organization_fixtures;
pub use registry::{FixtureRegistry, OrganizationDefinition, SeedDefinition};
pub use seed::{MemberSeed, OrganizationSeed};
pub use validation::{USERNAME_MAX, USERNAME_MIN, is_valid_username};
