//! Unit tests for the architecture lint.

use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource::new(file, contents)])
}

#[rstest]
#[case::domain_uses_ports(
    "domain/case_service.rs",
    "use crate::domain::ports::LedgerStore; fn f<S: LedgerStore>(_s: &S) {}",
    true
)]
#[case::inbound_uses_domain(
    "inbound/contract/mod.rs",
    "use crate::domain::{Error, InvocationContext}; fn f(_c: &InvocationContext) -> Option<Error> { None }",
    true
)]
#[case::outbound_uses_domain(
    "outbound/ledger/memory.rs",
    "use crate::domain::ports::LedgerStoreError; fn f() -> LedgerStoreError { LedgerStoreError::unavailable(\"x\") }",
    true
)]
#[case::inbound_imports_outbound(
    "inbound/contract/mod.rs",
    "use crate::outbound::ledger::InMemoryLedger; fn f() { let _ = InMemoryLedger::new(); }",
    false
)]
#[case::inbound_imports_outbound_by_crate_name(
    "inbound/contract/mod.rs",
    "use cdms::outbound::ledger::InMemoryLedger; fn f() { let _ = InMemoryLedger::new(); }",
    false
)]
#[case::inbound_imports_outbound_bare(
    "inbound/contract/mod.rs",
    "use outbound::ledger::InMemoryLedger; fn f() {}",
    false
)]
#[case::inbound_uses_filesystem(
    "inbound/contract/mod.rs",
    "use cap_std::fs::Dir; fn f(_d: &Dir) {}",
    false
)]
#[case::domain_imports_outbound_in_tests(
    "domain/repository_tests.rs",
    "use crate::outbound::ledger::InMemoryLedger; fn f() {}",
    false
)]
#[case::domain_reads_config(
    "domain/case_service.rs",
    "fn f() -> Option<String> { crate::config::CdmsSettings::default_org() }",
    false
)]
#[case::domain_hashes_files(
    "domain/record.rs",
    "use sha2::Sha256; fn f() {}",
    false
)]
#[case::outbound_imports_inbound(
    "outbound/identity.rs",
    "use crate::inbound::contract::Contract; fn f() {}",
    false
)]
#[case::outbound_parses_cli(
    "outbound/digest.rs",
    "use clap::Parser; fn f() {}",
    false
)]
fn detects_boundary_violations(#[case] file: &str, #[case] contents: &str, #[case] ok: bool) {
    let result = lint_one(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn files_outside_layers_are_rejected() {
    let result = lint_one("main.rs", "fn main() {}");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}

#[rstest]
fn repeated_paths_report_one_violation_per_rule() {
    let result = lint_one(
        "domain/case.rs",
        "use crate::outbound::ledger; fn f() { let _ = crate::outbound::ledger::InMemoryLedger::new(); }",
    );
    let Err(ArchitectureLintError::Violations(violations)) = result else {
        panic!("expected violations, got {result:?}");
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations.first().map(|v| v.message.as_str()),
        Some("domain module must not depend on crate::outbound")
    );
}
