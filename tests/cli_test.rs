// tests/cli_test.rs
use assert_cmd::Command;
use mockito::Server;
use std::fs;
use tempfile::TempDir;

fn project(manifest: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    if let Some(contents) = manifest {
        fs::write(dir.path().join("package.json"), contents).unwrap();
    }
    dir
}

fn publish_version(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("publish-version").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("NPM_TOKEN")
        .env_remove("NPM_REGISTRY")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.path());
    cmd
}

#[test]
fn test_help_describes_tool() {
    let dir = project(None);
    let output = publish_version(&dir).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("publish-version"));
    assert!(stdout.contains("--token"));
    assert!(stdout.contains("--registry"));
}

#[test]
fn test_prints_local_version_when_ahead() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/core-ui")
        .with_status(200)
        .with_body(r#"{ "dist-tags": { "latest": "1.0.2" } }"#)
        .create();
    let dir = project(Some(r#"{"name":"core-ui","version":"1.1.0"}"#));

    let output = publish_version(&dir)
        .args(["--registry", server.url().as_str()])
        .output()
        .unwrap();

    mock.assert();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "1.1.0");
}

#[test]
fn test_prints_bumped_version_without_touching_manifest() {
    let mut server = Server::new();
    server
        .mock("GET", "/core-ui")
        .match_header("authorization", "Bearer npm_ci_token")
        .with_status(200)
        .with_body(r#"{ "dist-tags": { "latest": "1.2.5" } }"#)
        .create();
    let manifest = r#"{"name":"core-ui","version":"1.0.0"}"#;
    let dir = project(Some(manifest));

    let output = publish_version(&dir)
        .env("NPM_TOKEN", "npm_ci_token")
        .env("NPM_REGISTRY", format!("{}/", server.url()))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "1.2.6");
    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        manifest
    );
}

#[test]
fn test_registry_from_npmrc() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/core-ui")
        .with_status(200)
        .with_body(r#"{ "dist-tags": { "latest": "1.0.2" } }"#)
        .create();
    let dir = project(Some(r#"{"name":"core-ui","version":"1.0.2"}"#));
    fs::write(
        dir.path().join(".npmrc"),
        format!("registry={}/\n", server.url()),
    )
    .unwrap();

    let output = publish_version(&dir).output().unwrap();

    mock.assert();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "1.0.3");
}

#[test]
fn test_project_dir_relocates_config_file() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/core-ui")
        .with_status(200)
        .with_body(r#"{ "dist-tags": { "latest": "2.3.4" } }"#)
        .create();
    let workdir = project(None);
    let package = project(Some(r#"{"name":"core-ui","version":"2.0.0"}"#));
    fs::write(
        package.path().join("publishversion.toml"),
        format!("[registry]\nurl = \"{}\"\n", server.url()),
    )
    .unwrap();

    let output = publish_version(&workdir)
        .arg("--project-dir")
        .arg(package.path())
        .output()
        .unwrap();

    mock.assert();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "2.3.5");
}

#[test]
fn test_missing_manifest_exits_with_one() {
    let server = Server::new();
    let dir = project(None);

    let output = publish_version(&dir)
        .args(["--registry", server.url().as_str()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("package.json"));
}

#[test]
fn test_registry_error_exits_with_one() {
    let mut server = Server::new();
    server
        .mock("GET", "/core-ui")
        .with_status(404)
        .with_body(r#"{ "error": "Not found" }"#)
        .create();
    let dir = project(Some(r#"{"name":"core-ui","version":"1.0.0"}"#));

    let output = publish_version(&dir)
        .args(["--registry", server.url().as_str()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr).unwrap().contains("Not found"));
}

#[test]
fn test_missing_latest_exits_with_one() {
    let mut server = Server::new();
    server
        .mock("GET", "/core-ui")
        .with_status(200)
        .with_body(r#"{ "name": "core-ui" }"#)
        .create();
    let dir = project(Some(r#"{"name":"core-ui","version":"1.0.0"}"#));

    let output = publish_version(&dir)
        .args(["--registry", server.url().as_str()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr).unwrap().contains("latest"));
}
