// tests/integration_test.rs
mod common;

use std::path::Path;
use std::process::{Command, Output};
use std::time::Duration;
use tempfile::TempDir;

fn publish_gate(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_publish-gate"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute publish-gate")
}

fn write_config(dir: &Path, index_base_url: &str) {
    let config = format!(
        r#"
[index]
kind = "pypi"
package = "pulp-ansible-client"
base_url = "{}"
timeout_secs = 5

[steps]
build = ["echo $PUBLISH_GATE_VERSION > built"]
upload = ["echo $PUBLISH_GATE_VERSION > uploaded"]
install_existing = ["echo $PUBLISH_GATE_VERSION > installed"]
"#,
        index_base_url
    );
    std::fs::write(dir.join("publish-gate.toml"), config).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_publish_gate_help() {
    let dir = TempDir::new().unwrap();
    let output = publish_gate(dir.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("publish-gate"));
    assert!(out.contains("resolve"));
    assert!(out.contains("publish"));
}

#[test]
fn test_resolve_tagged_head() {
    let dir = TempDir::new().unwrap();
    let head = common::init_repo(dir.path());
    common::tag(dir.path(), "1.2.3", head);

    let output = publish_gate(dir.path(), &["resolve", "--reported-version", "1.2.3"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "1.2.3");
}

#[test]
fn test_resolve_untagged_dev_version() {
    let dir = TempDir::new().unwrap();
    common::init_repo(dir.path());

    let output = publish_gate(dir.path(), &["resolve", "--reported-version", "1.2.3.dev"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let version = stdout(&output).trim().to_string();
    let suffix = version
        .strip_prefix("1.2.3.dev")
        .expect("resolved version keeps the reported prefix");
    assert!(!suffix.is_empty());
    assert!(suffix.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_resolve_untagged_release_version_fails() {
    let dir = TempDir::new().unwrap();
    common::init_repo(dir.path());

    let output = publish_gate(dir.path(), &["resolve", "--reported-version", "1.2.3"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Refusing to publish"));
}

#[test]
fn test_resolve_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let output = publish_gate(dir.path(), &["resolve", "--reported-version", "1.2.3.dev"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_publish_skips_when_already_released() {
    let dir = TempDir::new().unwrap();
    let head = common::init_repo(dir.path());
    common::tag(dir.path(), "1.2.3", head);
    let (base_url, requests) = common::serve(200, "");
    write_config(dir.path(), &base_url);

    let output = publish_gate(dir.path(), &["publish", "--reported-version", "1.2.3"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("already been released"));
    assert_eq!(
        requests.recv_timeout(Duration::from_secs(5)).unwrap(),
        "/project/pulp-ansible-client/1.2.3/"
    );
    assert!(!dir.path().join("built").exists());
    assert!(!dir.path().join("uploaded").exists());
    let installed = std::fs::read_to_string(dir.path().join("installed")).unwrap();
    assert_eq!(installed.trim(), "1.2.3");
}

#[test]
fn test_publish_builds_and_uploads_new_version() {
    let dir = TempDir::new().unwrap();
    let head = common::init_repo(dir.path());
    common::tag(dir.path(), "1.2.3", head);
    let (base_url, _requests) = common::serve(404, "");
    write_config(dir.path(), &base_url);

    let output = publish_gate(dir.path(), &["publish", "--reported-version", "1.2.3"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let uploaded = std::fs::read_to_string(dir.path().join("uploaded")).unwrap();
    assert_eq!(uploaded.trim(), "1.2.3");
    assert!(dir.path().join("built").exists());
    assert!(!dir.path().join("installed").exists());
}

#[test]
fn test_publish_dry_run_runs_nothing() {
    let dir = TempDir::new().unwrap();
    common::init_repo(dir.path());
    let (base_url, _requests) = common::serve(404, "");
    write_config(dir.path(), &base_url);

    let output = publish_gate(
        dir.path(),
        &["publish", "--reported-version", "1.2.3.dev", "--dry-run"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Dry run"));
    assert!(!dir.path().join("built").exists());
}

#[test]
fn test_publish_invalid_version_never_contacts_index() {
    let dir = TempDir::new().unwrap();
    common::init_repo(dir.path());
    let (base_url, requests) = common::serve(404, "");
    write_config(dir.path(), &base_url);

    let output = publish_gate(dir.path(), &["publish", "--reported-version", "1.2.3"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(requests.try_recv().is_err());
    assert!(!dir.path().join("built").exists());
}

#[test]
fn test_publish_reads_version_from_status_endpoint() {
    let dir = TempDir::new().unwrap();
    let head = common::init_repo(dir.path());
    common::tag(dir.path(), "0.7.0", head);
    let (status_url, _status_requests) = common::serve(
        200,
        r#"{"versions": [{"component": "core", "version": "3.21.0"}, {"component": "ansible", "version": "0.7.0"}]}"#,
    );
    let (index_url, _index_requests) = common::serve(200, "");
    write_config(dir.path(), &index_url);
    let config_path = dir.path().join("publish-gate.toml");
    let mut config = std::fs::read_to_string(&config_path).unwrap();
    config.push_str(&format!(
        "\n[status]\nurl = \"{}/pulp/api/v3/status/\"\n",
        status_url
    ));
    std::fs::write(&config_path, config).unwrap();

    let output = publish_gate(dir.path(), &["publish"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let installed = std::fs::read_to_string(dir.path().join("installed")).unwrap();
    assert_eq!(installed.trim(), "0.7.0");
}

#[test]
fn test_failing_build_step_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let head = common::init_repo(dir.path());
    common::tag(dir.path(), "1.2.3", head);
    let (base_url, _requests) = common::serve(404, "");
    std::fs::write(
        dir.path().join("publish-gate.toml"),
        format!(
            "[index]\nbase_url = \"{}\"\n\n[steps]\nbuild = [\"exit 4\"]\nupload = [\"touch uploaded\"]\n",
            base_url
        ),
    )
    .unwrap();

    let output = publish_gate(dir.path(), &["publish", "--reported-version", "1.2.3"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("exit code 4"));
    assert!(!dir.path().join("uploaded").exists());
}

#[test]
fn test_check_explicit_version() {
    let dir = TempDir::new().unwrap();
    let (base_url, requests) = common::serve(404, "");
    write_config(dir.path(), &base_url);

    let output = publish_gate(dir.path(), &["check", "--version", "9.9.9"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("is not published"));
    assert_eq!(
        requests.recv_timeout(Duration::from_secs(5)).unwrap(),
        "/project/pulp-ansible-client/9.9.9/"
    );
}

#[test]
fn test_show_config() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "http://127.0.0.1:1");

    let output = publish_gate(dir.path(), &["show-config"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("[index]"));
    assert!(out.contains("pulp-ansible-client"));
    assert!(out.contains("http://127.0.0.1:1"));
}
