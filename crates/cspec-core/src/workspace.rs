//! Read-only views over `cspec/specs/` and `cspec/work/`.

use crate::error::{CspecError, Result};
use crate::paths;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory helpers
// ---------------------------------------------------------------------------

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Immediate subdirectories of `dir`, sorted by name.
fn subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Names of regular files in `dir` accepted by `keep`, sorted. Missing dir → empty.
fn files_where(dir: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let name = file_name(&path);
        if path.is_file() && keep(&name) {
            out.push(name);
        }
    }
    out.sort();
    Ok(out)
}

fn names(dirs: &[PathBuf]) -> Vec<String> {
    dirs.iter().map(|d| file_name(d)).collect()
}

// ---------------------------------------------------------------------------
// Specs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecEntry {
    pub feature: String,
    pub title: String,
    pub diagrams: Vec<String>,
}

/// Title from a leading `#` heading on the first line, else `fallback`.
pub fn spec_title(content: &str, fallback: &str) -> String {
    let first = content.lines().next().unwrap_or("").trim();
    if first.starts_with('#') {
        first.trim_start_matches('#').trim().to_string()
    } else {
        fallback.to_string()
    }
}

fn read_spec_entry(dir: &Path) -> Result<(SpecEntry, String)> {
    let feature = file_name(dir);
    let content = std::fs::read_to_string(dir.join(paths::SPEC_FILE))?;
    let entry = SpecEntry {
        title: spec_title(&content, &feature),
        diagrams: files_where(dir, |n| n.ends_with(".mmd"))?,
        feature,
    };
    Ok((entry, content))
}

pub fn list_specs(root: &Path) -> Result<Vec<SpecEntry>> {
    let dir = paths::specs_dir(root);
    if !dir.is_dir() {
        return Err(CspecError::NotInitialized);
    }
    subdirs(&dir)?
        .iter()
        .filter(|d| d.join(paths::SPEC_FILE).is_file())
        .map(|d| read_spec_entry(d).map(|(entry, _)| entry))
        .collect()
}

/// The spec entry and the full text of its `spec.md`.
pub fn load_spec(root: &Path, feature: &str) -> Result<(SpecEntry, String)> {
    paths::validate_slug(feature)?;
    let dir = paths::spec_dir(root, feature);
    if !dir.join(paths::SPEC_FILE).is_file() {
        return Err(CspecError::SpecNotFound(feature.to_string()));
    }
    read_spec_entry(&dir)
}

/// Names of every directory under `cspec/specs/`, for "did you mean" hints.
pub fn available_specs(root: &Path) -> Vec<String> {
    subdirs(&paths::specs_dir(root))
        .map(|d| names(&d))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Work items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItem {
    pub slug: String,
    pub has_issue: bool,
    pub has_proposal: bool,
    /// `spec-<feature>.md` drafts awaiting promotion into `cspec/specs/`.
    pub specs: Vec<String>,
    pub context: Vec<String>,
}

impl WorkItem {
    /// `issue_file` is the configured issue document name (`validation.issue_file`).
    fn read(dir: &Path, issue_file: &str) -> Result<Self> {
        Ok(Self {
            slug: file_name(dir),
            has_issue: dir.join(issue_file).is_file(),
            has_proposal: dir.join(paths::PROPOSAL_FILE).is_file(),
            specs: files_where(dir, |n| n.starts_with("spec-") && n.ends_with(".md"))?,
            context: files_where(&dir.join(paths::CONTEXT_DIR), |n| n.ends_with(".md"))?,
        })
    }

    /// e.g. `issue, proposal, 2 spec(s), 1 context`, or `empty`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.has_issue {
            parts.push("issue".to_string());
        }
        if self.has_proposal {
            parts.push("proposal".to_string());
        }
        if !self.specs.is_empty() {
            parts.push(format!("{} spec(s)", self.specs.len()));
        }
        if !self.context.is_empty() {
            parts.push(format!("{} context", self.context.len()));
        }
        if parts.is_empty() {
            "empty".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Feature name a `spec-<feature>.md` draft will be promoted to.
    pub fn spec_feature(spec_file: &str) -> &str {
        spec_file
            .strip_prefix("spec-")
            .and_then(|s| s.strip_suffix(".md"))
            .unwrap_or(spec_file)
    }
}

pub fn list_work_items(root: &Path, issue_file: &str) -> Result<Vec<WorkItem>> {
    let dir = paths::work_dir(root);
    if !dir.is_dir() {
        return Err(CspecError::NotInitialized);
    }
    subdirs(&dir)?
        .iter()
        .map(|d| WorkItem::read(d, issue_file))
        .collect()
}

pub fn load_work_item(root: &Path, slug: &str, issue_file: &str) -> Result<WorkItem> {
    paths::validate_slug(slug)?;
    let dir = paths::work_item_dir(root, slug);
    if !dir.is_dir() {
        return Err(CspecError::WorkItemNotFound(slug.to_string()));
    }
    WorkItem::read(&dir, issue_file)
}

pub fn available_work_items(root: &Path) -> Vec<String> {
    subdirs(&paths::work_dir(root))
        .map(|d| names(&d))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Project health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub name: &'static str,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectHealth {
    pub checks: Vec<HealthCheck>,
    /// `None` when `cspec/specs/` is missing.
    pub specs: Option<Vec<SpecEntry>>,
    /// `None` when `cspec/work/` is missing.
    pub work: Option<Vec<WorkItem>>,
}

impl ProjectHealth {
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|c| c.present)
    }
}

pub fn project_health(root: &Path, issue_file: &str) -> Result<ProjectHealth> {
    let checks = vec![
        HealthCheck {
            name: "cspec/specs/",
            present: paths::specs_dir(root).is_dir(),
        },
        HealthCheck {
            name: "cspec/work/",
            present: paths::work_dir(root).is_dir(),
        },
        HealthCheck {
            name: ".claude/commands/",
            present: root.join(paths::CLAUDE_COMMANDS_ROOT).is_dir(),
        },
        HealthCheck {
            name: "AGENTS.md",
            present: paths::agents_md_path(root).is_file(),
        },
    ];

    let specs = match list_specs(root) {
        Ok(s) => Some(s),
        Err(CspecError::NotInitialized) => None,
        Err(e) => return Err(e),
    };
    let work = match list_work_items(root, issue_file) {
        Ok(w) => Some(w),
        Err(CspecError::NotInitialized) => None,
        Err(e) => return Err(e),
    };

    Ok(ProjectHealth {
        checks,
        specs,
        work,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn spec_title_from_heading() {
        assert_eq!(spec_title("# Auth Login\nbody", "auth"), "Auth Login");
        assert_eq!(spec_title("## Nested\n", "auth"), "Nested");
        assert_eq!(spec_title("no heading\n", "auth"), "auth");
        assert_eq!(spec_title("", "auth"), "auth");
    }

    #[test]
    fn lists_specs_with_diagrams() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cspec/specs/cache/spec.md", "# Cache Layer\n");
        write(dir.path(), "cspec/specs/cache/flow.mmd", "graph TD");
        write(dir.path(), "cspec/specs/auth/spec.md", "plain\n");
        std::fs::create_dir_all(dir.path().join("cspec/specs/draft-only")).unwrap();

        let specs = list_specs(dir.path()).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].feature, "auth");
        assert_eq!(specs[0].title, "auth");
        assert_eq!(specs[1].title, "Cache Layer");
        assert_eq!(specs[1].diagrams, vec!["flow.mmd"]);

        assert_eq!(
            available_specs(dir.path()),
            vec!["auth", "cache", "draft-only"]
        );
    }

    #[test]
    fn missing_specs_dir_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            list_specs(dir.path()),
            Err(CspecError::NotInitialized)
        ));
        assert!(matches!(
            load_spec(dir.path(), "cache"),
            Err(CspecError::SpecNotFound(_))
        ));
    }

    #[test]
    fn work_item_summary() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cspec/work/add-cache/issue.md", "---\n---\n");
        write(dir.path(), "cspec/work/add-cache/proposal.md", "");
        write(dir.path(), "cspec/work/add-cache/spec-cache.md", "");
        write(dir.path(), "cspec/work/add-cache/spec-eviction.md", "");
        write(dir.path(), "cspec/work/add-cache/context/problem.md", "");
        std::fs::create_dir_all(dir.path().join("cspec/work/empty-one")).unwrap();

        let items = list_work_items(dir.path(), paths::ISSUE_FILE).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].summary(), "issue, proposal, 2 spec(s), 1 context");
        assert_eq!(items[1].summary(), "empty");
        assert_eq!(WorkItem::spec_feature(&items[0].specs[1]), "eviction");

        let item = load_work_item(dir.path(), "add-cache", paths::ISSUE_FILE).unwrap();
        assert_eq!(item, items[0]);
        assert!(matches!(
            load_work_item(dir.path(), "nope", paths::ISSUE_FILE),
            Err(CspecError::WorkItemNotFound(_))
        ));
    }

    #[test]
    fn issue_detected_under_configured_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cspec/work/x/ISSUE.md", "---\n---\n");

        let items = list_work_items(dir.path(), "ISSUE.md").unwrap();
        assert!(items[0].has_issue);
        assert_eq!(items[0].summary(), "issue");
        assert!(load_work_item(dir.path(), "x", "ISSUE.md").unwrap().has_issue);
    }

    #[test]
    fn health_reports_missing_pieces() {
        let dir = TempDir::new().unwrap();
        let health = project_health(dir.path(), paths::ISSUE_FILE).unwrap();
        assert!(!health.is_healthy());
        assert!(health.specs.is_none());
        assert!(health.work.is_none());

        for d in ["cspec/specs", "cspec/work", ".claude/commands"] {
            std::fs::create_dir_all(dir.path().join(d)).unwrap();
        }
        write(dir.path(), "AGENTS.md", "# Agents\n");
        let health = project_health(dir.path(), paths::ISSUE_FILE).unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.specs, Some(Vec::new()));
    }
}
