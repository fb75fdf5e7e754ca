//! CLI end-to-end tests that invoke the compiled `bench` binary.

use assert_cmd::Command;
use bench_test_utils::bench::TestBench;
use bench_test_utils::git::git_repo_with_commit;
use predicates::prelude::*;
use tempfile::TempDir;

fn bench_cmd(bench: &TestBench) -> Command {
    let mut cmd = Command::cargo_bin("bench").unwrap();
    cmd.env_remove("BENCH_PATH")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--bench")
        .arg(bench.root());
    cmd
}

/// A git repository laid out as an installable app.
fn upstream_app(name: &str) -> TempDir {
    let upstream = TempDir::new().unwrap();
    let package = upstream.path().join(name);
    std::fs::create_dir_all(&package).unwrap();
    for marker in ["hooks.py", "modules.txt", "patches.txt"] {
        std::fs::write(package.join(marker), "").unwrap();
    }
    std::fs::write(package.join("__init__.py"), "__version__ = \"1.4.0\"\n").unwrap();
    git_repo_with_commit(upstream.path());
    upstream
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("bench")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("get-app"))
        .stdout(predicate::str::contains("remove-app"))
        .stdout(predicate::str::contains("sync"));
}

#[test]
fn init_then_list_empty() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("fresh");

    Command::cargo_bin("bench")
        .unwrap()
        .env_remove("BENCH_PATH")
        .arg("init")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench initialized"));

    assert!(root.join("sites/apps.txt").is_file());
    assert!(root.join("archived/apps").is_dir());

    Command::cargo_bin("bench")
        .unwrap()
        .env("BENCH_PATH", &root)
        .env("NO_COLOR", "1")
        .arg("list-apps")
        .assert()
        .success()
        .stdout(predicate::str::contains("No apps installed"));
}

#[test]
fn commands_outside_bench_fail() {
    let bench = TestBench::bare();
    bench_cmd(&bench)
        .arg("list-apps")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a bench directory"));
}

#[test]
fn sync_then_list_json() {
    let bench = TestBench::new();
    bench.add_app("sparrow", Some("15.2.0"));
    bench.add_git_app("crm", None);

    bench_cmd(&bench).arg("sync").assert().success();
    assert_eq!(bench.read_file("sites/apps.txt"), "sparrow\ncrm\n");

    let output = bench_cmd(&bench)
        .args(["list-apps", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let rows: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(rows[0]["name"], "sparrow");
    assert_eq!(rows[0]["version"], "15.2.0");
    assert_eq!(rows[1]["name"], "crm");
    assert_eq!(rows[1]["is_repo"], true);
}

#[test]
fn get_app_and_remove_app_round_trip() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    let upstream = upstream_app("crm");

    bench_cmd(&bench)
        .arg("get-app")
        .arg(upstream.path())
        .args(["--name", "crm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed crm"));
    bench.assert_file_exists("apps/crm/crm/hooks.py");
    assert_eq!(bench.read_file("sites/apps.txt"), "sparrow\ncrm\n");

    bench_cmd(&bench)
        .arg("get-app")
        .arg(upstream.path())
        .args(["--name", "crm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already installed"));

    bench_cmd(&bench)
        .args(["remove-app", "crm", "--no-backup"])
        .assert()
        .success();
    bench.assert_file_not_exists("apps/crm");
    assert_eq!(bench.read_file("sites/apps.txt"), "sparrow\n");

    let state: serde_json::Value =
        serde_json::from_str(&bench.read_file("sites/apps.json")).unwrap();
    assert!(state.get("crm").is_none());
}

#[test]
fn remove_app_in_use_by_site_fails() {
    let bench = TestBench::new();
    bench.add_app("sparrow", None);
    bench.add_app("crm", None);
    bench.add_site("acme.local", &["sparrow", "crm"]);

    bench_cmd(&bench)
        .args(["remove-app", "crm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("acme.local"));
    bench.assert_file_exists("apps/crm");
}

#[test]
fn exclude_and_include_app() {
    let bench = TestBench::new();
    bench.add_app("crm", None);

    bench_cmd(&bench).args(["exclude-app", "crm"]).assert().success();
    assert_eq!(bench.read_file("sites/excluded_apps.txt"), "crm\n");

    bench_cmd(&bench)
        .arg("list-apps")
        .assert()
        .success()
        .stdout(predicate::str::contains("excluded"));

    bench_cmd(&bench)
        .args(["list-apps", "--updatable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No apps to update"));

    bench_cmd(&bench).args(["include-app", "crm"]).assert().success();
    assert_eq!(bench.read_file("sites/excluded_apps.txt"), "");
}
