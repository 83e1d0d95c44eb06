//! End-to-end tests driving the `crm` binary against a temporary database.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("crm.db")
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn crm(&self) -> Command {
        let mut cmd = Command::cargo_bin("crm").unwrap();
        cmd.env_remove("CRM_DB")
            .env_remove("CRM_LATENCY_MS")
            .env_remove("CRM_PASSWORD")
            .env_remove("RUST_LOG")
            .current_dir(self.path())
            .arg("--db")
            .arg(self.db());
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.crm().arg("--json").args(args).output().unwrap();
        assert!(
            output.status.success(),
            "crm {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    fn login(&self) {
        self.crm()
            .args(["login", "sam@example.com", "--password", "secret"])
            .assert()
            .success();
    }
}

#[test]
fn test_protected_command_requires_login() {
    let env = Env::new();
    let output = env
        .crm()
        .args(["--json", "contact", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));

    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "NOT_AUTHENTICATED");
}

#[test]
fn test_login_opens_protected_routes() {
    let env = Env::new();

    let before = env.json(&["route", "/dashboard"]);
    assert_eq!(before["outcome"], "redirect");
    assert_eq!(before["route"]["page"], "login");

    env.login();

    let after = env.json(&["route", "/dashboard"]);
    assert_eq!(after["outcome"], "render");
    assert_eq!(after["route"]["page"], "dashboard");

    let root = env.json(&["route", "/"]);
    assert_eq!(root["outcome"], "redirect");
    assert_eq!(root["route"]["page"], "dashboard");

    let unknown = env.json(&["route", "/nowhere"]);
    assert_eq!(unknown["outcome"], "notfound");
}

#[test]
fn test_logout_closes_the_session() {
    let env = Env::new();
    env.login();
    env.crm().args(["status"]).assert().success();

    env.crm().arg("logout").assert().success();
    env.crm().args(["task", "list"]).assert().code(5);
}

#[test]
fn test_login_rejects_blank_password() {
    let env = Env::new();
    env.crm()
        .args(["login", "sam@example.com", "--password", "  "])
        .assert()
        .code(4);
}

#[test]
fn test_contacts_reset_between_runs() {
    let env = Env::new();
    env.login();

    let added = env.json(&[
        "contact",
        "add",
        "Ada",
        "Lovelace",
        "--email",
        "ada@example.com",
        "--company",
        "Engines Ltd",
    ]);
    assert_eq!(added["id"], 7);

    // Contacts are session-only: a new process starts from the seed again.
    let list = env.json(&["contact", "list"]);
    assert_eq!(list["count"], 6);
}

#[test]
fn test_opportunities_persist_between_runs() {
    let env = Env::new();
    env.login();

    let seeded = env.json(&["opportunity", "list"]);
    let seeded_count = seeded["count"].as_u64().unwrap();

    let added = env.json(&[
        "opportunity",
        "add",
        "Fleet renewal",
        "--client",
        "Harbour Logistics",
        "--value",
        "42000",
        "--close-date",
        "2026-12-01",
        "--owner",
        "Sam",
    ]);
    let id = added["id"].as_str().unwrap().to_string();

    let list = env.json(&["opportunity", "list"]);
    assert_eq!(list["count"].as_u64().unwrap(), seeded_count + 1);

    let shown = env.json(&["opportunity", "show", &id]);
    assert_eq!(shown["client"], "Harbour Logistics");
    assert_eq!(shown["stage"], "prospecting");

    env.json(&["opportunity", "delete", &id]);
    env.crm().args(["opportunity", "show", &id]).assert().code(3);
}

#[test]
fn test_invalid_stage_suggests_closest() {
    let env = Env::new();
    env.login();

    let output = env
        .crm()
        .args(["--json", "opportunity", "list", "--stage", "negotation"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "INVALID_VALUE");
}

#[test]
fn test_report_to_stdout() {
    let env = Env::new();
    env.login();

    let report = env.json(&["report", "--stdout", "--range", "7days"]);
    assert_eq!(report["dateRange"], "7days");
    assert_eq!(report["summary"]["totalContacts"], 6);
    assert_eq!(report["summary"]["totalTasks"], 5);
    assert!(report["generatedAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_report_and_backup_files() {
    let env = Env::new();
    env.login();

    let out = env.path().join("exports");
    let report = env.json(&["report", "--output", out.to_str().unwrap()]);
    let report_path = PathBuf::from(report["path"].as_str().unwrap());
    assert!(report_path.exists());
    assert!(
        report_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("crm-report-")
    );

    let backup = env.json(&["backup", "--output", out.to_str().unwrap()]);
    let backup_path = PathBuf::from(backup["path"].as_str().unwrap());
    let doc: Value = serde_json::from_str(&std::fs::read_to_string(backup_path).unwrap()).unwrap();
    assert!(doc["opportunities"].is_string());
    assert!(doc["contacts"].is_null());
}

#[test]
fn test_settings_theme_toggle_persists() {
    let env = Env::new();
    env.login();

    let toggled = env.json(&["settings", "theme"]);
    assert_eq!(toggled["theme"], "dark");

    let shown = env.json(&["settings", "show"]);
    assert_eq!(shown["theme"], "dark");
    assert_eq!(shown["settings"]["theme"], "dark");

    env.crm().args(["settings", "clear-data"]).assert().code(4);
}

#[test]
fn test_shell_keeps_session_state() {
    let env = Env::new();
    env.login();

    let output = env
        .crm()
        .args(["--silent", "shell"])
        .write_stdin("task add \"Call Ada\" --assigned-to Sam --due 2026-11-02\ntask complete 6\nexit\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<&str> = stdout.lines().collect();
    assert_eq!(ids, vec!["6", "6"]);
}

#[test]
fn test_shell_continues_after_parse_error() {
    let env = Env::new();
    env.login();

    let output = env
        .crm()
        .args(["--silent", "shell"])
        .write_stdin("contact frobnicate\ntask complete 1\nexit\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
    assert!(String::from_utf8_lossy(&output.stderr).contains("frobnicate"));
}

#[test]
fn test_task_list_huge_upcoming_window() {
    let env = Env::new();
    env.login();
    let list = env.json(&["task", "list", "--upcoming", "1000000000"]);
    assert!(list["count"].is_u64());
}

#[test]
fn test_route_repeated_slash_is_not_found() {
    let env = Env::new();
    env.login();
    let nav = env.json(&["route", "//"]);
    assert_eq!(nav["outcome"], "notfound");
}

#[test]
fn test_version() {
    let env = Env::new();
    let version = env.json(&["version"]);
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}
