//! Integration tests for loading fixture registries from disk.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::path::{Path, PathBuf};

use ledger_fixtures::{FixtureRegistry, RegistryError, generate_organization_fixtures};
use rstest::{fixture, rstest};

#[fixture]
fn registry_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("registry.json")
}

#[rstest]
fn loads_registry_from_file(registry_path: PathBuf) {
    let registry = FixtureRegistry::from_file(&registry_path).expect("registry loads");

    assert_eq!(registry.organizations().len(), 2);
    assert_eq!(registry.seeds().len(), 2);
}

#[rstest]
fn missing_file_reports_path(registry_path: PathBuf) {
    let missing = registry_path.with_file_name("absent.json");
    let result = FixtureRegistry::from_file(&missing);

    match result {
        Err(RegistryError::IoError { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected IoError, got {other:?}"),
    }
}

#[rstest]
#[case("harbour-watch", 3)]
#[case("solo-shift", 1)]
fn seeds_from_file_generate_expected_counts(
    registry_path: PathBuf,
    #[case] seed_name: &str,
    #[case] expected_members: usize,
) {
    let registry = FixtureRegistry::from_file(&registry_path).expect("registry loads");
    let seed = registry.find_seed(seed_name).expect("seed exists");
    let organizations = generate_organization_fixtures(&registry, seed).expect("generated");

    assert!(
        organizations
            .iter()
            .all(|org| org.members.len() == expected_members)
    );
}
