use crate::error::{CspecError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CSPEC_DIR: &str = "cspec";
pub const SPECS_DIR: &str = "cspec/specs";
pub const WORK_DIR: &str = "cspec/work";
/// GitHub reads issue forms from here.
pub const TEMPLATES_DIR: &str = ".github/ISSUE_TEMPLATE";

pub const CONFIG_FILE: &str = "cspec/config.yaml";

pub const CLAUDE_COMMANDS_ROOT: &str = ".claude/commands";
pub const CLAUDE_COMMANDS_DIR: &str = ".claude/commands/cspec";

pub const AGENTS_MD: &str = "AGENTS.md";
pub const CLAUDE_MD: &str = "CLAUDE.md";

pub const SPEC_FILE: &str = "spec.md";
pub const ISSUE_FILE: &str = "issue.md";
pub const PROPOSAL_FILE: &str = "proposal.md";
pub const CONTEXT_DIR: &str = "context";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn specs_dir(root: &Path) -> PathBuf {
    root.join(SPECS_DIR)
}

pub fn spec_dir(root: &Path, feature: &str) -> PathBuf {
    specs_dir(root).join(feature)
}

pub fn work_dir(root: &Path) -> PathBuf {
    root.join(WORK_DIR)
}

pub fn work_item_dir(root: &Path, slug: &str) -> PathBuf {
    work_dir(root).join(slug)
}

pub fn issue_path(root: &Path, slug: &str, issue_file: &str) -> PathBuf {
    work_item_dir(root, slug).join(issue_file)
}

pub fn templates_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATES_DIR)
}

pub fn claude_commands_dir(root: &Path) -> PathBuf {
    root.join(CLAUDE_COMMANDS_DIR)
}

pub fn agents_md_path(root: &Path) -> PathBuf {
    root.join(AGENTS_MD)
}

pub fn claude_md_path(root: &Path) -> PathBuf {
    root.join(CLAUDE_MD)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(CspecError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
