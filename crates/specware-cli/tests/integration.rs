#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn specware(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("specware").unwrap();
    cmd.current_dir(dir.path())
        .env("SPECWARE_ROOT", dir.path())
        .env_remove("JIRA_URL")
        .env_remove("JIRA_API_TOKEN");
    cmd
}

fn init_project(dir: &TempDir) {
    specware(dir).arg("init").assert().success();
}

fn write_settings(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(".claude/settings.local.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// ---------------------------------------------------------------------------
// specware init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    specware(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully initialized spec-driven workflow"))
        .stdout(predicate::str::contains("Claude Code settings file not found"))
        .stdout(predicate::str::contains("Next steps:"));

    assert!(dir.path().join(".claude/commands/specify.md").is_file());
    assert!(dir.path().join(".claude/agents").is_dir());
    assert!(dir.path().join(".spec/README.md").is_file());
    assert!(dir.path().join(".spec/config.json").is_file());
    assert!(dir.path().join(".spec/000-example-spec/.spec-status.json").is_file());
    assert!(!dir.path().join(".claude/settings.local.json").exists());
}

#[test]
fn init_into_explicit_directory() {
    let dir = TempDir::new().unwrap();
    specware(&dir)
        .args(["init", "sub/project"])
        .assert()
        .success();
    assert!(dir.path().join("sub/project/.spec/config.json").is_file());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    specware(&dir).arg("init").assert().success();
    specware(&dir).arg("init").assert().success();
}

#[test]
fn init_yes_adds_allow_entry() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(
        &dir,
        r#"{"permissions": {"allow": ["Bash(git:*)"], "deny": []}, "model": "x"}"#,
    );

    specware(&dir)
        .args(["init", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully updated Claude Code permissions"))
        .stdout(predicate::str::contains("Added: \"Bash(specware:*)\""));

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        doc["permissions"]["allow"],
        serde_json::json!(["Bash(git:*)", "Bash(specware:*)"])
    );
    assert_eq!(doc["permissions"]["deny"], serde_json::json!([]));
    assert_eq!(doc["model"], "x");
}

#[test]
fn init_yes_when_already_configured() {
    let dir = TempDir::new().unwrap();
    let original = r#"{"permissions": {"allow": ["Bash(specware:*)"]}}"#;
    let path = write_settings(&dir, original);

    specware(&dir)
        .args(["init", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Specware permissions already configured"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn init_leaves_malformed_settings_untouched() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, "{ invalid json");

    specware(&dir)
        .args(["init", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully initialized spec-driven workflow"))
        .stdout(predicate::str::contains(
            "Warning: Settings file appears to be malformed JSON",
        ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ invalid json");
}

#[test]
fn init_prompt_declined() {
    let dir = TempDir::new().unwrap();
    let original = r#"{"permissions": {"allow": []}}"#;
    let path = write_settings(&dir, original);

    specware(&dir)
        .arg("init")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Update permissions? (y/N)"))
        .stdout(predicate::str::contains("Skipping Claude Code permissions update."));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn init_prompt_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_settings(&dir, r#"{"permissions": {"allow": []}}"#);

    specware(&dir)
        .arg("init")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully updated Claude Code permissions"));
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .contains("Bash(specware:*)"));
}

#[test]
fn init_help_describes_layout() {
    let dir = TempDir::new().unwrap();
    specware(&dir)
        .args(["init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize project to support spec-driven-workflow"))
        .stdout(predicate::str::contains(".claude/commands/"))
        .stdout(predicate::str::contains("Optional modifications (user will be prompted):"))
        .stdout(predicate::str::contains(".claude/settings.local.json"))
        .stdout(predicate::str::contains("-y, --yes"));
}

#[test]
fn init_json_output() {
    let dir = TempDir::new().unwrap();
    let json = stdout_json(specware(&dir).args(["init", "--json"]));
    assert_eq!(json["settings"], "file_absent");
    assert!(json["created"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p == ".spec/config.json"));
}

// ---------------------------------------------------------------------------
// specware feature
// ---------------------------------------------------------------------------

#[test]
fn feature_requires_init() {
    let dir = TempDir::new().unwrap();
    specware(&dir)
        .args(["feature", "new-requirements", "alpha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("specware init"));
    assert!(!dir.path().join(".spec").exists());
}

#[test]
fn feature_new_requirements() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    specware(&dir)
        .args(["feature", "new-requirements", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created feature requirements for 'alpha'"))
        .stdout(predicate::str::contains(".spec/001-alpha/requirements.md"));

    let feature = dir.path().join(".spec/001-alpha");
    assert!(feature.join("requirements.md").is_file());
    let context = std::fs::read_to_string(feature.join("context-requirements.md")).unwrap();
    assert!(context.contains("# Context: Requirements"));
    let status = std::fs::read_to_string(feature.join(".spec-status.json")).unwrap();
    assert!(status.contains("\"current-step\": \"requirements-gathering\""));
}

#[test]
fn feature_numbers_increase() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    for name in ["alpha", "beta"] {
        specware(&dir)
            .args(["feature", "new-requirements", name])
            .assert()
            .success();
    }
    assert!(dir.path().join(".spec/002-beta").is_dir());
}

#[test]
fn feature_invalid_name_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    specware(&dir)
        .args(["feature", "new-requirements", "bad name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "feature name can only contain letters, numbers, hyphens, and underscores",
        ));
    specware(&dir)
        .args(["feature", "new-requirements", &"a".repeat(51)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("50 characters or less"));
}

#[test]
fn implementation_plan_flow() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    specware(&dir)
        .args(["feature", "new-implementation-plan", "alpha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("feature directory not found for alpha"));

    specware(&dir)
        .args(["feature", "new-requirements", "alpha"])
        .assert()
        .success();
    specware(&dir)
        .args(["feature", "new-implementation-plan", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created implementation plan for feature 'alpha'"));

    let feature = dir.path().join(".spec/001-alpha");
    assert!(feature.join("implementation-plan.md").is_file());
    let context =
        std::fs::read_to_string(feature.join("context-implementation-plan.md")).unwrap();
    assert!(context.contains("# Context: Implementation Plan"));
    let status = std::fs::read_to_string(feature.join(".spec-status.json")).unwrap();
    assert!(status.contains("requirements-gathering"));

    specware(&dir)
        .args(["feature", "new-implementation-plan", "alpha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("implementation plan already exists"));
}

#[test]
fn update_state_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    specware(&dir)
        .args(["feature", "new-requirements", "alpha"])
        .assert()
        .success();

    specware(&dir)
        .args(["feature", "update-state", "alpha", "requirements-review"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Updated status for feature 'alpha' to 'requirements-review'",
        ));

    specware(&dir)
        .args(["feature", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("000-example-spec"))
        .stdout(predicate::str::contains("001-alpha"))
        .stdout(predicate::str::contains("requirements-review"));

    let json = stdout_json(specware(&dir).args(["feature", "list", "--json"]));
    let features = json.as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[1]["short_name"], "alpha");
    assert_eq!(features[1]["current_step"], "requirements-review");
}

#[test]
fn update_state_unknown_feature_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    specware(&dir)
        .args(["feature", "update-state", "ghost", "plan-qa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("feature directory not found for ghost"));
}

#[test]
fn root_detected_from_subdirectory() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let sub = dir.path().join("src/deep");
    std::fs::create_dir_all(&sub).unwrap();

    let mut cmd = Command::cargo_bin("specware").unwrap();
    cmd.current_dir(&sub)
        .env_remove("SPECWARE_ROOT")
        .args(["feature", "new-requirements", "alpha"])
        .assert()
        .success();
    assert!(dir.path().join(".spec/001-alpha").is_dir());
}

// ---------------------------------------------------------------------------
// specware localize-templates
// ---------------------------------------------------------------------------

#[test]
fn localize_templates_and_override() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    specware(&dir)
        .arg("localize-templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Templates localized to .spec/templates/"))
        .stdout(predicate::str::contains("Warning").not());
    assert!(dir.path().join(".spec/templates/requirements.md").is_file());

    specware(&dir)
        .arg("localize-templates")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Warning: Template file .spec/templates/requirements.md already exists, overwriting",
        ))
        .stderr(predicate::str::contains("overwriting").not());

    std::fs::write(
        dir.path().join(".spec/templates/requirements.md"),
        "# Custom requirements\n",
    )
    .unwrap();
    specware(&dir)
        .args(["feature", "new-requirements", "alpha"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".spec/001-alpha/requirements.md")).unwrap(),
        "# Custom requirements\n"
    );
}

// ---------------------------------------------------------------------------
// specware config
// ---------------------------------------------------------------------------

#[test]
fn config_show() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    specware(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Requirements:"))
        .stdout(predicate::str::contains("context questions: 5"));

    std::fs::write(
        dir.path().join(".spec/config.json"),
        r#"{"implementation_plan": {"expert_questions": 9}}"#,
    )
    .unwrap();
    let json = stdout_json(specware(&dir).args(["config", "show", "--json"]));
    assert_eq!(json["implementation_plan"]["expert_questions"], 9);
    assert_eq!(json["requirements"]["context_questions"], 5);
}

// ---------------------------------------------------------------------------
// specware jira
// ---------------------------------------------------------------------------

#[test]
fn jira_requires_environment() {
    let dir = TempDir::new().unwrap();
    specware(&dir)
        .args(["jira", "get-issue", "PROJ-123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JIRA_URL environment variable is required"));

    specware(&dir)
        .env("JIRA_URL", "https://example.atlassian.net")
        .args(["jira", "get-issue", "PROJ-123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JIRA_API_TOKEN environment variable is required"));
}

#[test]
fn jira_get_issue() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/api/2/issue/PROJ-123")
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"key": "PROJ-123", "fields": {
                "summary": "Fix authentication bug",
                "description": "Users are experiencing authentication failures",
                "status": {"name": "In Progress"},
                "issuetype": {"name": "Bug"},
                "priority": {"name": "High"},
                "assignee": {"displayName": "John Smith"},
                "created": "2024-01-15T10:30:00.000+0000"
            }}"#,
        )
        .create();

    specware(&dir)
        .env("JIRA_URL", server.url())
        .env("JIRA_API_TOKEN", "secret")
        .args(["jira", "get-issue", "PROJ-123"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Issue: PROJ-123\nTitle: Fix authentication bug\n"))
        .stdout(predicate::str::contains("Assignee: John Smith\n\nDescription:\n"));
    mock.assert();
}

#[test]
fn jira_not_found() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/rest/api/2/issue/PROJ-999")
        .with_status(404)
        .create();

    specware(&dir)
        .env("JIRA_URL", server.url())
        .env("JIRA_API_TOKEN", "secret")
        .args(["jira", "get-issue", "PROJ-999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue 'PROJ-999' not found"));
}

#[test]
fn jira_invalid_key() {
    let dir = TempDir::new().unwrap();
    specware(&dir)
        .env("JIRA_URL", "http://127.0.0.1:1")
        .env("JIRA_API_TOKEN", "secret")
        .args(["jira", "get-issue", "PROJ123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid issue key format 'PROJ123'"));
}
