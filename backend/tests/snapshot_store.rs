//! Snapshot file persistence for the in-memory ledger.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use cdms::domain::{Error, ErrorCode, InvocationContext};
use cdms::inbound::contract::Contract;
use cdms::outbound::ledger::{InMemoryLedger, LedgerSnapshotFile, SnapshotError};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    path: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8Path::from_path(dir.path())
        .expect("utf-8 temp dir")
        .join("ledger.json");
    Workspace { _dir: dir, path }
}

fn case_args(title: &str) -> Vec<String> {
    ["C1", title, "d", "North", "theft", ""]
        .iter()
        .map(|arg| (*arg).to_owned())
        .collect()
}

#[rstest]
fn missing_file_loads_as_empty_ledger(workspace: Workspace) {
    let snapshot = LedgerSnapshotFile::new(workspace.path.clone());
    let ledger = snapshot.lock().expect("lock").load().expect("load");
    assert!(ledger.entries().expect("entries").is_empty());
}

#[rstest]
fn stored_entries_load_back_in_order(workspace: Workspace) {
    let snapshot = LedgerSnapshotFile::new(workspace.path.clone());
    let mut entries = BTreeMap::new();
    entries.insert("case:C2".to_owned(), br#"{"docType":"case","id":"C2"}"#.to_vec());
    entries.insert("case:C1".to_owned(), br#"{"docType":"case","id":"C1"}"#.to_vec());
    let lock = snapshot.lock().expect("lock");
    lock.store(&InMemoryLedger::from_entries(entries.clone()))
        .expect("store");

    let reloaded = lock.load().expect("load");
    assert_eq!(reloaded.entries().expect("entries"), entries);
}

#[rstest]
fn committed_invocation_survives_reload(workspace: Workspace) {
    let snapshot = LedgerSnapshotFile::new(workspace.path.clone());
    let context = InvocationContext::for_org("OrgA");
    {
        let lock = snapshot.lock().expect("lock");
        let ledger = lock.load().expect("load");
        ledger
            .transact(|transaction| {
                Contract::new(transaction).invoke(&context, "CreateCase", &case_args("Burglary"))
            })
            .expect("created");
        lock.store(&ledger).expect("store");
    }

    let reloaded = snapshot.lock().expect("relock").load().expect("reload");
    let read_args = vec!["C1".to_owned(), "clerk".to_owned()];
    let response = reloaded
        .transact(|transaction| Contract::new(transaction).invoke(&context, "QueryCase", &read_args))
        .expect("case survives");
    let payload = response.payload().expect("case payload");
    assert_eq!(payload["title"], "Burglary");
}

#[rstest]
#[case::unsupported_version(r#"{"version": 9, "entries": {}}"#)]
#[case::not_json("ledger")]
#[case::wrong_shape(r#"{"version": 1, "entries": []}"#)]
fn bad_snapshots_are_dependency_failures(workspace: Workspace, #[case] contents: &str) {
    std::fs::write(&workspace.path, contents).expect("write fixture");

    let snapshot = LedgerSnapshotFile::new(workspace.path.clone());
    let err = snapshot
        .lock()
        .expect("lock")
        .load()
        .expect_err("rejected");
    assert!(matches!(
        err,
        SnapshotError::UnsupportedVersion { .. } | SnapshotError::Malformed { .. }
    ));
    assert_eq!(Error::from(err).code(), ErrorCode::DependencyFailure);
}

#[rstest]
fn binary_entries_cannot_be_stored(workspace: Workspace) {
    let mut entries = BTreeMap::new();
    entries.insert("record:R1".to_owned(), vec![0xff, 0xfe]);

    let snapshot = LedgerSnapshotFile::new(workspace.path.clone());
    let err = snapshot
        .lock()
        .expect("lock")
        .store(&InMemoryLedger::from_entries(entries))
        .expect_err("non-text value");

    assert!(matches!(err, SnapshotError::NonTextEntry { ref key } if key == "record:R1"));
    assert!(!workspace.path.exists());
}

#[rstest]
fn second_holder_is_refused_while_locked(workspace: Workspace) {
    let first = LedgerSnapshotFile::new(workspace.path.clone());
    let second = LedgerSnapshotFile::new(workspace.path.clone());
    let held = first.lock().expect("first lock");

    let err = second.try_lock().expect_err("contended");
    assert!(matches!(err, SnapshotError::Locked { ref path } if *path == workspace.path));
    assert_eq!(Error::from(err).code(), ErrorCode::DependencyFailure);

    drop(held);
    second.try_lock().expect("released on drop");
}

#[rstest]
fn serialized_invocations_cannot_both_create_a_case(workspace: Workspace) {
    let context = InvocationContext::for_org("OrgA");
    let snapshot = LedgerSnapshotFile::new(workspace.path.clone());
    {
        let lock = snapshot.lock().expect("first lock");
        let ledger = lock.load().expect("first load");
        assert!(snapshot.try_lock().is_err());
        ledger
            .transact(|transaction| {
                Contract::new(transaction).invoke(&context, "CreateCase", &case_args("first"))
            })
            .expect("first create");
        lock.store(&ledger).expect("first store");
    }

    let lock = snapshot.try_lock().expect("second lock");
    let ledger = lock.load().expect("second load");
    let err = ledger
        .transact(|transaction| {
            Contract::new(transaction).invoke(&context, "CreateCase", &case_args("second"))
        })
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::AlreadyExists);

    let read_args = vec!["C1".to_owned(), "clerk".to_owned()];
    let response = ledger
        .transact(|transaction| Contract::new(transaction).invoke(&context, "QueryCase", &read_args))
        .expect("case");
    assert_eq!(response.payload().expect("payload")["title"], "first");
}
