use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    config: PathBuf,
    cache: PathBuf,
    apps_root: PathBuf,
}

fn fixture(apps: &[&str]) -> Fixture {
    let temp = TempDir::new().expect("tempdir");
    let apps_root = temp.path().join("apps");
    fs::create_dir_all(&apps_root).expect("apps root");
    for app in apps {
        fs::write(apps_root.join(app), b"").expect("app file");
    }

    let config = temp.path().join("appdex.toml");
    fs::write(
        &config,
        format!(
            r#"
roots = ["{root}"]
priority_prefixes = ["{root}"]
extensions = ["exe"]
index_unix_executables = false
"#,
            root = apps_root.display()
        ),
    )
    .expect("config file");

    Fixture {
        cache: temp.path().join("app_index.json"),
        config,
        apps_root,
        _temp: temp,
    }
}

fn appdex(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("appdex").expect("binary");
    cmd.arg("--quiet")
        .arg("--config")
        .arg(&fixture.config)
        .arg("--cache")
        .arg(&fixture.cache);
    cmd
}

#[test]
fn index_builds_and_persists_cache() {
    let fixture = fixture(&["Notepad.exe", "Browser.exe"]);

    appdex(&fixture)
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("indexed"));

    assert!(fixture.cache.exists(), "cache file missing after index");
}

#[test]
fn resolve_prints_exact_match() {
    let fixture = fixture(&["Notepad.exe"]);
    let expected = fixture.apps_root.join("Notepad.exe");

    appdex(&fixture)
        .args(["resolve", "notepad"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_str().expect("utf8 path")));
}

#[test]
fn resolve_miss_suggests_refresh() {
    let fixture = fixture(&["Notepad.exe"]);

    appdex(&fixture)
        .args(["resolve", "zzqqxx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no match"))
        .stdout(predicate::str::contains("appdex index"));
}

#[test]
fn resolve_json_emits_ranked_candidates() {
    let fixture = fixture(&["ImageEditor.exe", "ImageViewer.exe"]);

    let output = appdex(&fixture)
        .args(["resolve", "--json", "image"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let candidates: serde_json::Value =
        serde_json::from_slice(&output).expect("valid JSON on stdout");
    let pool = candidates.as_array().expect("array of candidates");
    assert_eq!(pool.len(), 2);
    for candidate in pool {
        assert!(candidate.get("total_score").is_some());
        assert!(candidate.get("target").is_some());
    }
}

#[test]
fn intent_with_foreign_action_is_reported_unsupported() {
    let fixture = fixture(&["Notepad.exe"]);

    appdex(&fixture)
        .args(["intent", r#"{"action": "google_search", "query": "weather"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("another component"));
}

#[test]
fn repl_refresh_rebuilds_then_exits() {
    let fixture = fixture(&["Notepad.exe"]);

    appdex(&fixture)
        .arg("repl")
        .write_stdin("refresh\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("indexed"));
}

#[test]
fn deleting_cache_is_recovered_on_next_resolve() {
    let fixture = fixture(&["Notepad.exe"]);

    appdex(&fixture).arg("index").assert().success();
    fs::remove_file(&fixture.cache).expect("delete cache");

    appdex(&fixture)
        .args(["resolve", "notepad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notepad"));
    assert!(fixture.cache.exists(), "resolve did not rebuild the cache");
}

#[test]
fn corrupt_cache_is_rebuilt_not_fatal() {
    let fixture = fixture(&["Notepad.exe"]);
    fs::write(&fixture.cache, b"{ definitely not json").expect("corrupt cache");

    appdex(&fixture)
        .args(["resolve", "notepad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notepad"));
}
