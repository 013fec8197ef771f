use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn console(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vulkan_console").unwrap();
    cmd.env_remove("VULKAN_BACKEND_URL")
        .env("RUST_LOG", "off")
        .arg("--latency-ms")
        .arg("0")
        .arg("--token-file")
        .arg(dir.path().join("vulkan_token"));
    cmd
}

#[test]
fn prints_version() {
    Command::cargo_bin("vulkan_console")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("vulkan_console "));
}

#[test]
fn starts_on_login_page_without_token() {
    let dir = TempDir::new().unwrap();
    console(&dir)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(redirected to /login)"))
        .stdout(predicate::str::contains("== Vulkan Admin =="));
}

#[test]
fn login_persists_token_between_runs() {
    let dir = TempDir::new().unwrap();
    console(&dir)
        .write_stdin("login\nadmin@vulkan.com\n123456\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("empresa.com"));

    let token = std::fs::read_to_string(dir.path().join("vulkan_token")).unwrap();
    assert_eq!(token, "fake-jtw-token");

    console(&dir)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Domains =="));
}

#[test]
fn logout_removes_token() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("vulkan_token"), "fake-jtw-token").unwrap();
    console(&dir)
        .write_stdin("logout\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Vulkan Admin =="));
    assert!(!dir.path().join("vulkan_token").exists());
}

#[test]
fn bad_credentials_show_alert() {
    let dir = TempDir::new().unwrap();
    console(&dir)
        .write_stdin("login\nadmin@vulkan.com\nwrong\n\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid credentials. Please try again."));
    assert!(!dir.path().join("vulkan_token").exists());
}
