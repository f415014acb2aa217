use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sitetheme(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sitetheme").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_then_check() {
    let dir = TempDir::new().unwrap();

    sitetheme(&dir).arg("init").assert().success();
    let written = fs::read_to_string(dir.path().join("theme.toml")).unwrap();
    assert!(written.contains("dateFormat = \"YYYY-MM-DD\""));

    sitetheme(&dir)
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("is valid"));
}

#[test]
fn init_keeps_existing_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("theme.toml"), "[site]\ntitle = \"Mine\"\n").unwrap();

    sitetheme(&dir)
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    let kept = fs::read_to_string(dir.path().join("theme.toml")).unwrap();
    assert_eq!(kept, "[site]\ntitle = \"Mine\"\n");
}

#[test]
fn check_requires_a_file() {
    let dir = TempDir::new().unwrap();
    sitetheme(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sitetheme init"));
}

#[test]
fn check_rejects_unknown_date_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("theme.toml"), "[date]\ndateFormat = \"YYYY/MM/DD\"\n").unwrap();

    sitetheme(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variant"));
}

#[test]
fn check_notes_ignored_separator() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("theme.toml"),
        "[date]\ndateFormat = \"DAY MONTH YYYY\"\ndateSeparator = \".\"\n",
    )
    .unwrap();

    sitetheme(&dir)
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("dateSeparator is ignored"));
}

#[test]
fn show_defaults_without_config_file() {
    let dir = TempDir::new().unwrap();

    sitetheme(&dir)
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"James Hartig\""))
        .stdout(predicate::str::contains("\"centeredLayout\": false"))
        .stdout(predicate::str::contains("\"dateFormat\": \"YYYY-MM-DD\""))
        .stdout(predicate::str::contains("\"copyCode\": true"));
}

#[test]
fn show_applies_overrides() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.toml"), "[general]\ncenteredLayout = true\n").unwrap();

    sitetheme(&dir)
        .args(["--config", "custom.toml", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("centeredLayout = true"))
        .stdout(predicate::str::contains("title = \"James Hartig\""));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    sitetheme(&dir)
        .args(["--config", "missing.toml", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn date_follows_settings() {
    let dir = TempDir::new().unwrap();

    sitetheme(&dir)
        .args(["date", "2025-03-07"])
        .assert()
        .success()
        .stdout("2025-03-07\n");

    fs::write(
        dir.path().join("theme.toml"),
        "[date]\ndateFormat = \"MM-DD-YYYY\"\ndateSeparator = \"/\"\n",
    )
    .unwrap();
    sitetheme(&dir)
        .args(["date", "2025-03-07"])
        .assert()
        .success()
        .stdout("03/07/2025\n");

    fs::write(dir.path().join("theme.toml"), "[date]\ndateFormat = \"MONTH DAY YYYY\"\n").unwrap();
    sitetheme(&dir)
        .args(["date", "2025-03-07"])
        .assert()
        .success()
        .stdout("March 7 2025\n");
}

#[test]
fn date_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    sitetheme(&dir)
        .args(["date", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized date"));
}

#[test]
fn post_renders_to_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("hello.md"),
        "---\ntitle: Hello\ndate: 2025-01-02\n---\n## First\n\nHi.\n",
    )
    .unwrap();
    fs::write(dir.path().join("theme.toml"), "[post]\ntoc = true\nreadingTime = true\n").unwrap();

    sitetheme(&dir)
        .args(["post", "hello.md", "--out", "hello.html"])
        .assert()
        .success();

    let html = fs::read_to_string(dir.path().join("hello.html")).unwrap();
    assert!(html.contains("<title>Hello | James Hartig</title>"));
    assert!(html.contains("<a href=\"#first\">First</a>"));
    assert!(html.contains("1 min read"));
}

#[test]
fn index_lists_posts_newest_first() {
    let dir = TempDir::new().unwrap();
    let posts = dir.path().join("posts");
    fs::create_dir(&posts).unwrap();
    fs::write(posts.join("a.md"), "---\ntitle: Older\ndate: 2024-05-01\n---\nx").unwrap();
    fs::write(posts.join("b.md"), "---\ntitle: Newer\ndate: 2025-05-01\n---\nx").unwrap();

    let out = sitetheme(&dir).args(["index", "posts"]).assert().success();
    let html = String::from_utf8(out.get_output().stdout.clone()).unwrap();

    let newer = html.find(">Newer</a>").unwrap();
    let older = html.find(">Older</a>").unwrap();
    assert!(newer < older);
    assert!(html.contains("post-list date-right"));
}
