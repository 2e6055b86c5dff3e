#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cspec(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cspec").unwrap();
    cmd.current_dir(dir.path())
        .env("CSPEC_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn init_project(dir: &TempDir) {
    cspec(dir).arg("init").assert().success();
}

fn write(dir: &TempDir, rel: &str, content: &str) {
    let path = dir.path().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

const CONTEXT_FM: &str = "\
context:
  required:
    - type: problem-statement
      path: context/problem.md
";

fn issue(extra_frontmatter: &str) -> String {
    format!(
        "---
id: ISSUE-042
title: Add response cache
nature: feature
impact: additive
version: minor
status: draft
created: 2024-03-01
updated: 2024-03-02
{extra_frontmatter}---

## Problem
Lookups are slow.

## Scope
### In Scope
- read-through cache

## Acceptance Criteria
- [ ] p99 under 10ms
"
    )
}

// ---------------------------------------------------------------------------
// cspec init / update
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    cspec(&dir).arg("init").assert().success();

    assert!(dir.path().join("cspec/specs").is_dir());
    assert!(dir.path().join("cspec/work").is_dir());
    assert!(dir.path().join(".github/ISSUE_TEMPLATE/feature.yml").exists());
    assert!(dir.path().join(".github/ISSUE_TEMPLATE/bug.yml").exists());
    assert!(!dir.path().join("cspec/templates").exists());
    assert!(dir.path().join("AGENTS.md").exists());
    assert!(dir.path().join(".claude/commands/cspec/work-start.md").exists());
    assert!(dir.path().join(".claude/commands/cspec/issue-validate.md").exists());
    assert!(!dir.path().join("CLAUDE.md").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    cspec(&dir).arg("init").assert().success();
    cspec(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  AGENTS.md"));
}

#[test]
fn init_keeps_existing_agents_md_unless_forced() {
    let dir = TempDir::new().unwrap();
    write(&dir, "AGENTS.md", "# Ours\n");
    cspec(&dir).arg("init").assert().success();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("AGENTS.md")).unwrap(),
        "# Ours\n"
    );

    cspec(&dir).args(["init", "--force"]).assert().success();
    let content = std::fs::read_to_string(dir.path().join("AGENTS.md")).unwrap();
    assert!(content.contains("## PROJECT CONTEXT"));
}

#[test]
fn init_adds_claude_reference_once() {
    let dir = TempDir::new().unwrap();
    write(&dir, "CLAUDE.md", "# Claude\n");
    init_project(&dir);
    init_project(&dir);
    let content = std::fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap();
    assert_eq!(content.matches("AGENTS.md").count(), 2);
}

#[test]
fn update_requires_init() {
    let dir = TempDir::new().unwrap();
    cspec(&dir)
        .arg("update")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn update_preserves_project_context() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    write(
        &dir,
        "AGENTS.md",
        "# stale header\n\n## PROJECT CONTEXT\n\nWe ship a Rust CLI.\n",
    );

    cspec(&dir)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT CONTEXT preserved"));

    let content = std::fs::read_to_string(dir.path().join("AGENTS.md")).unwrap();
    assert!(!content.contains("stale header"));
    assert!(content.contains("cspec for spec-driven development"));
    assert!(content.ends_with("## PROJECT CONTEXT\n\nWe ship a Rust CLI.\n"));
}

// ---------------------------------------------------------------------------
// cspec status / onboard
// ---------------------------------------------------------------------------

#[test]
fn status_fails_before_init() {
    let dir = TempDir::new().unwrap();
    cspec(&dir)
        .arg("status")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[MISSING]"))
        .stdout(predicate::str::contains("ISSUES FOUND"));
}

#[test]
fn status_healthy_after_init() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::create_dir_all(dir.path().join("cspec/work/add-cache")).unwrap();
    write(&dir, "cspec/work/add-cache/issue.md", &issue(""));

    cspec(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("HEALTHY"))
        .stdout(predicate::str::contains("add-cache/ (issue)"));
}

#[test]
fn status_json() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let out = cspec(&dir).args(["status", "--json"]).output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["checks"].as_array().unwrap().len(), 4);
    assert_eq!(v["specs"], serde_json::json!([]));
}

#[test]
fn onboard_prints_prompt_until_filled() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    cspec(&dir)
        .arg("onboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Project Onboarding"));

    write(
        &dir,
        "AGENTS.md",
        "## PROJECT CONTEXT\n\n### Project Overview\n\nA spec CLI.\nWritten in Rust.\nOne binary.\n\n### Tech Stack\n",
    );
    cspec(&dir)
        .arg("onboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("already onboarded"));
    cspec(&dir)
        .args(["onboard", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-running onboarding"));
}

// ---------------------------------------------------------------------------
// cspec templates / specs / work
// ---------------------------------------------------------------------------

#[test]
fn templates_list_and_get() {
    let dir = TempDir::new().unwrap();
    cspec(&dir)
        .args(["templates", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature"))
        .stdout(predicate::str::contains("refactor"));

    cspec(&dir)
        .args(["templates", "get", "bug"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Bug"));

    let out = cspec(&dir)
        .args(["templates", "get", "feature", "--format", "json"])
        .output()
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["name"], "Feature");
}

#[test]
fn templates_get_unknown_lists_available() {
    let dir = TempDir::new().unwrap();
    cspec(&dir)
        .args(["templates", "get", "epic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template not found: epic"))
        .stderr(predicate::str::contains("bug, enhancement, feature, refactor"));
}

#[test]
fn specs_list_and_show() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    write(&dir, "cspec/specs/cache/spec.md", "# Cache Layer\n\nDetails.\n");
    write(&dir, "cspec/specs/cache/flow.mmd", "graph TD");

    cspec(&dir)
        .args(["specs", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache Layer"));

    cspec(&dir)
        .args(["specs", "show", "cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Details."))
        .stdout(predicate::str::contains("flow.mmd"));

    cspec(&dir)
        .args(["specs", "show", "auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("available specs: cache"));
}

#[test]
fn specs_list_requires_init() {
    let dir = TempDir::new().unwrap();
    cspec(&dir)
        .args(["specs", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cspec init"));
}

#[test]
fn work_list_and_show() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    write(&dir, "cspec/work/add-cache/issue.md", &issue(""));
    write(&dir, "cspec/work/add-cache/spec-cache.md", "# Cache\n");

    cspec(&dir)
        .args(["work", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("issue, 1 spec(s)"));

    cspec(&dir)
        .args(["work", "show", "add-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id: ISSUE-042"))
        .stdout(predicate::str::contains("spec-cache.md -> cspec/specs/cache/spec.md"));

    cspec(&dir)
        .args(["work", "show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("work item not found: nope"));
}

#[test]
fn configured_issue_file_is_used_everywhere() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    write(&dir, "cspec/config.yaml", "validation:\n  issue_file: ISSUE.md\n");
    write(&dir, "cspec/work/add-cache/ISSUE.md", &issue(CONTEXT_FM));

    cspec(&dir)
        .args(["work", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add-cache  issue"));

    cspec(&dir)
        .args(["work", "show", "add-cache"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Issue (ISSUE.md):"))
        .stdout(predicate::str::contains("id: ISSUE-042"));

    cspec(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-cache/ (issue)"));

    cspec(&dir)
        .args(["validate", "--work", "add-cache"])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// cspec validate
// ---------------------------------------------------------------------------

#[test]
fn validate_clean_issue_passes() {
    let dir = TempDir::new().unwrap();
    write(&dir, "issue.md", &issue(CONTEXT_FM));
    cspec(&dir)
        .args(["validate", "issue.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verdict: pass"));
}

#[test]
fn validate_warning_passes_unless_strict() {
    let dir = TempDir::new().unwrap();
    write(&dir, "issue.md", &issue(""));

    cspec(&dir)
        .args(["validate", "issue.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("context type 'problem-statement' not referenced"))
        .stdout(predicate::str::contains("verdict: pass_with_warnings"));

    cspec(&dir)
        .args(["validate", "issue.md", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("verdict: fail_strict"));
}

#[test]
fn validate_strict_from_config() {
    let dir = TempDir::new().unwrap();
    write(&dir, "cspec/config.yaml", "validation:\n  strict: true\n");
    write(&dir, "issue.md", &issue(""));
    cspec(&dir).args(["validate", "issue.md"]).assert().code(1);
}

#[test]
fn validate_reports_all_errors_as_json() {
    let dir = TempDir::new().unwrap();
    let text = issue("")
        .replace("impact: additive", "impact: breaking")
        .replace("updated: 2024-03-02", "updated: 2024-02-01");
    write(&dir, "issue.md", &text);

    let out = cspec(&dir)
        .args(["validate", "issue.md", "--json"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["verdict"], "fail");
    let errors = v["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors[0]["message"]
        .as_str()
        .unwrap()
        .starts_with("version mismatch"));
    assert!(errors[1]["message"]
        .as_str()
        .unwrap()
        .contains("cannot be before created date"));
}

#[test]
fn validate_missing_frontmatter_is_one_line() {
    let dir = TempDir::new().unwrap();
    write(&dir, "issue.md", "## Problem\nno frontmatter\n");
    cspec(&dir)
        .args(["validate", "issue.md"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing frontmatter"))
        .stdout(predicate::str::contains("Errors (").not());
}

#[test]
fn validate_by_work_slug() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    write(&dir, "cspec/work/add-cache/issue.md", &issue(CONTEXT_FM));
    cspec(&dir)
        .args(["validate", "--work", "add-cache"])
        .assert()
        .success();

    cspec(&dir)
        .args(["validate", "--work", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn validate_needs_a_target() {
    let dir = TempDir::new().unwrap();
    cspec(&dir)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to validate"));
}
