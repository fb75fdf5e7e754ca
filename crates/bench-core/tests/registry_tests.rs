//! Registry and reconciliation behaviour against real bench directories.

use bench_core::{
    AppRegistry, Error, MarkerVersionResolver, Resolution, StateDocument, SyncRequest,
};
use bench_fs::NormalizedPath;
use bench_git::Git2Inspector;
use bench_test_utils::bench::TestBench;
use bench_test_utils::git::fake_git_dir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn open(bench: &TestBench, primary: &str) -> AppRegistry {
    AppRegistry::open(
        NormalizedPath::new(bench.root()),
        primary,
        Box::new(Git2Inspector::new()),
        Box::new(MarkerVersionResolver::new()),
    )
    .unwrap()
}

fn app(name: &str) -> bench_core::AppName {
    bench_core::AppName::new(name).unwrap()
}

#[test]
fn sync_twice_is_byte_identical() {
    let bench = TestBench::new();
    bench.add_app("sparrow", Some("15.0.0"));
    bench.add_app("toolkit", None);
    bench.add_git_app("crm", Some("2.1.0"));

    let mut registry = open(&bench, "sparrow");
    registry.sync(&SyncRequest::for_app(app("crm"))).unwrap();
    let listing = bench.read_file("sites/apps.txt");
    let state = bench.read_file("sites/apps.json");

    let mut registry = open(&bench, "sparrow");
    registry.sync(&SyncRequest::new()).unwrap();
    registry.sync(&SyncRequest::for_app(app("crm"))).unwrap();

    assert_eq!(bench.read_file("sites/apps.txt"), listing);
    assert_eq!(bench.read_file("sites/apps.json"), state);
}

#[test]
fn primary_app_is_listed_first() {
    let bench = TestBench::new();
    bench.add_app("alpha", None);
    bench.add_app("zeta", None);
    bench.add_app("sparrow", None);

    let mut registry = open(&bench, "sparrow");
    registry.sync(&SyncRequest::new()).unwrap();

    assert_eq!(bench.read_file("sites/apps.txt"), "sparrow\nalpha\nzeta\n");
    assert_eq!(registry.get(0).unwrap(), "sparrow");
}

#[test]
fn invalid_directories_are_not_registered() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    bench.add_invalid_dir("node_modules");

    let registry = open(&bench, "sparrow");
    assert_eq!(registry.len(), 1);
    assert!(!registry.contains("node_modules"));
}

#[test]
fn removed_directory_is_pruned_from_state() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    bench.add_app("toolkit", None);

    let mut registry = open(&bench, "sparrow");
    registry.sync(&SyncRequest::new()).unwrap();
    assert!(registry.state_of("toolkit").is_some());

    bench.remove_app_dir("toolkit");
    let mut registry = open(&bench, "sparrow");
    let outcome = registry.sync(&SyncRequest::new()).unwrap();

    assert_eq!(outcome.pruned, vec!["toolkit".to_string()]);
    let on_disk = StateDocument::load(&registry.state_path()).unwrap().unwrap();
    assert!(!on_disk.contains("toolkit"));
    assert_eq!(bench.read_file("sites/apps.txt"), "sparrow\n");
}

#[test]
fn bootstrap_runs_once_for_legacy_bench() {
    let bench = TestBench::new();
    bench.add_app("beta", None);
    bench.add_app("sparrow", Some("15.0.0"));
    bench.add_app("alpha", None);
    bench.write_file("sites/apps.txt", "beta\nalpha\nsparrow\n");

    let mut registry = open(&bench, "sparrow");
    let outcome = registry.update_apps_states(&SyncRequest::new()).unwrap();
    assert!(outcome.bootstrapped);

    assert_eq!(registry.state().len(), 3);
    for (pos, name) in registry.apps().iter().enumerate() {
        let entry = registry.state_of(name.as_str()).unwrap();
        assert_eq!(entry.idx, pos + 1, "idx of {name}");
        assert_eq!(entry.resolution, Resolution::unresolved());
        assert!(!entry.is_repo);
    }
    assert_eq!(registry.state_of("sparrow").unwrap().version.as_deref(), Some("15.0.0"));
    assert_eq!(bench.read_file("sites/apps.txt"), "sparrow\nalpha\nbeta\n");

    let state = bench.read_file("sites/apps.json");
    let mut registry = open(&bench, "sparrow");
    let outcome = registry.update_apps_states(&SyncRequest::new()).unwrap();
    assert!(!outcome.bootstrapped);
    assert_eq!(bench.read_file("sites/apps.json"), state);
}

#[test]
fn bootstrapped_repository_stays_unresolved() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    bench.add_git_app("crm", None);
    bench.write_file("sites/apps.txt", "sparrow\ncrm\n");

    let mut registry = open(&bench, "sparrow");
    let outcome = registry.sync(&SyncRequest::for_app(app("crm"))).unwrap();

    assert!(outcome.bootstrapped);
    assert_eq!(outcome.inserted, None);
    let entry = registry.state_of("crm").unwrap();
    assert!(entry.is_repo);
    assert_eq!(entry.resolution, Resolution::unresolved());
}

#[test]
fn empty_bench_writes_empty_state_without_bootstrap() {
    let bench = TestBench::new();

    let mut registry = open(&bench, "sparrow");
    let outcome = registry.sync(&SyncRequest::new()).unwrap();

    assert!(!outcome.bootstrapped);
    assert_eq!(bench.read_file("sites/apps.txt"), "");
    assert_eq!(bench.read_file("sites/apps.json").trim(), "{}");
}

#[test]
fn targeted_upsert_records_non_repo_app() {
    let bench = TestBench::new();
    bench.add_app("platform", None);
    bench.add_app("toolkit", Some("0.3.1"));
    bench.write_file(
        "sites/apps.json",
        r#"{"platform": {"is_repo": false, "resolution": "not a repository",
            "required": [], "idx": 1, "version": null}}"#,
    );

    let mut registry = open(&bench, "platform");
    let outcome = registry
        .update_apps_states(&SyncRequest::for_app(app("toolkit")))
        .unwrap();

    assert_eq!(outcome.inserted, Some(app("toolkit")));
    let entry = registry.state_of("toolkit").unwrap();
    assert_eq!(entry.resolution, Resolution::NotARepository);
    assert_eq!(entry.idx, 2);
    assert!(!entry.is_repo);
    assert_eq!(entry.version.as_deref(), Some("0.3.1"));

    let raw: serde_json::Value =
        serde_json::from_str(&bench.read_file("sites/apps.json")).unwrap();
    assert_eq!(raw["toolkit"]["resolution"], "not a repository");
}

#[test]
fn targeted_upsert_records_branch_and_commit() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    let commit = bench.add_git_app("toolkit", None);
    bench.write_file("sites/apps.json", "{}");

    let mut registry = open(&bench, "sparrow");
    registry
        .update_apps_states(
            &SyncRequest::for_app(app("toolkit")).with_required(vec!["sparrow".into()]),
        )
        .unwrap();

    let entry = registry.state_of("toolkit").unwrap();
    assert!(entry.is_repo);
    assert_eq!(entry.resolution.branch(), Some("main"));
    assert_eq!(entry.resolution.commit_hash(), Some(commit.as_str()));
    assert_eq!(entry.required, vec!["sparrow".to_string()]);
}

#[test]
fn existing_entry_is_not_overwritten() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    bench.add_git_app("toolkit", None);
    bench.write_file(
        "sites/apps.json",
        r#"{"toolkit": {"is_repo": true,
            "resolution": {"commit_hash": "abc", "branch": "v1"}, "required": [], "idx": 7}}"#,
    );

    let mut registry = open(&bench, "sparrow");
    let outcome = registry
        .update_apps_states(&SyncRequest::for_app(app("toolkit")))
        .unwrap();

    assert_eq!(outcome.inserted, None);
    let entry = registry.state_of("toolkit").unwrap();
    assert_eq!(entry.idx, 7);
    assert_eq!(entry.resolution.commit_hash(), Some("abc"));
}

#[test]
fn repo_query_failure_leaves_state_file_untouched() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    let broken = bench.add_app("toolkit", None);
    fake_git_dir(&broken);
    let original = r#"{"sparrow": {"is_repo": false, "resolution": "not a repository",
        "required": [], "idx": 1}}"#;
    bench.write_file("sites/apps.json", original);

    let mut registry = open(&bench, "sparrow");
    let result = registry.sync(&SyncRequest::for_app(app("toolkit")));

    assert!(matches!(result, Err(Error::RepoQuery(_))), "got: {result:?}");
    assert_eq!(bench.read_file("sites/apps.json"), original);
    assert!(registry.state_of("toolkit").is_none());
}

#[test]
fn corrupt_state_is_reported_and_kept() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    bench.write_file("sites/apps.json", "{\"sparrow\": [");

    let result = AppRegistry::open(
        NormalizedPath::new(bench.root()),
        "sparrow",
        Box::new(Git2Inspector::new()),
        Box::new(MarkerVersionResolver::new()),
    );

    assert!(matches!(result, Err(Error::CorruptState { .. })), "got: {result:?}");
    assert_eq!(bench.read_file("sites/apps.json"), "{\"sparrow\": [");
}

#[rstest]
#[case::unknown_resolution_key(r#"{"sparrow": {"resolution": {"bogus": 1}, "idx": 1}}"#)]
#[case::partial_resolution(r#"{"sparrow": {"resolution": {"branch": "main"}, "idx": 1}}"#)]
#[case::unknown_entry_key(
    r#"{"sparrow": {"resolution": "not a repository", "idx": 1, "surprise": true}}"#
)]
fn malformed_entry_is_corrupt_state(#[case] content: &str) {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    bench.write_file("sites/apps.json", content);

    let result = AppRegistry::open(
        NormalizedPath::new(bench.root()),
        "sparrow",
        Box::new(Git2Inspector::new()),
        Box::new(MarkerVersionResolver::new()),
    );

    assert!(matches!(result, Err(Error::CorruptState { .. })), "got: {result:?}");
    assert_eq!(bench.read_file("sites/apps.json"), content);
}

#[test]
fn legacy_resolution_marker_is_rewritten() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    bench.write_file(
        "sites/apps.json",
        r#"{"sparrow": {"resolution": "not a repo", "idx": 1}}"#,
    );

    let mut registry = open(&bench, "sparrow");
    registry.sync(&SyncRequest::new()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&bench.read_file("sites/apps.json")).unwrap();
    assert_eq!(raw["sparrow"]["resolution"], "not a repository");
    assert_eq!(raw["sparrow"]["is_repo"], false);
}
