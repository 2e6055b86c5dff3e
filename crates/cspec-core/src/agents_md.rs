//! AGENTS.md / CLAUDE.md maintenance.
//!
//! AGENTS.md is split at the `## PROJECT CONTEXT` heading: everything above it
//! is managed by cspec and refreshed on update, everything from it onward
//! belongs to the project and is carried over untouched.

use crate::error::{CspecError, Result};
use crate::{io, paths};
use serde::Serialize;
use std::path::Path;
use tracing::warn;

pub const PROJECT_CONTEXT_MARKER: &str = "## PROJECT CONTEXT";

pub const AGENTS_REFERENCE: &str =
    "\nSee [AGENTS.md](AGENTS.md) for cspec workflow and project context.\n";

pub const LEGACY_SEPARATOR: &str = "\n\n<!-- Legacy content preserved below -->\n";

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Merged {
    /// Template header followed by the existing PROJECT CONTEXT section.
    Preserved(String),
    /// Existing file had no marker; its content was appended after the template.
    Legacy(String),
}

impl Merged {
    pub fn content(&self) -> &str {
        match self {
            Merged::Preserved(s) | Merged::Legacy(s) => s,
        }
    }
}

pub fn merge_agents_md(template: &str, existing: &str) -> Result<Merged> {
    let Some(template_idx) = template.find(PROJECT_CONTEXT_MARKER) else {
        return Err(CspecError::MissingMarker(PROJECT_CONTEXT_MARKER.to_string()));
    };
    let header = &template[..template_idx];

    match existing.find(PROJECT_CONTEXT_MARKER) {
        Some(idx) => Ok(Merged::Preserved(format!("{header}{}", &existing[idx..]))),
        None => Ok(Merged::Legacy(format!(
            "{template}{LEGACY_SEPARATOR}{existing}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// File-level operations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentsMdUpdate {
    Created,
    Overwritten,
    Preserved,
    Legacy,
}

/// Refresh `AGENTS.md` from `template`, keeping the project's context section.
pub fn update_agents_md(root: &Path, template: &str, force: bool) -> Result<AgentsMdUpdate> {
    if !template.contains(PROJECT_CONTEXT_MARKER) {
        return Err(CspecError::MissingMarker(PROJECT_CONTEXT_MARKER.to_string()));
    }
    let path = paths::agents_md_path(root);
    if !path.exists() {
        io::atomic_write(&path, template.as_bytes())?;
        return Ok(AgentsMdUpdate::Created);
    }
    if force {
        io::atomic_write(&path, template.as_bytes())?;
        return Ok(AgentsMdUpdate::Overwritten);
    }

    let existing = std::fs::read_to_string(&path)?;
    let merged = merge_agents_md(template, &existing)?;
    io::atomic_write(&path, merged.content().as_bytes())?;
    match merged {
        Merged::Preserved(_) => Ok(AgentsMdUpdate::Preserved),
        Merged::Legacy(_) => {
            warn!("AGENTS.md had no PROJECT CONTEXT marker; content preserved at end");
            Ok(AgentsMdUpdate::Legacy)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaudeReference {
    Added,
    AlreadyPresent,
    NoClaudeMd,
}

/// Point an existing CLAUDE.md at AGENTS.md. Never creates CLAUDE.md.
pub fn add_claude_reference(root: &Path) -> Result<ClaudeReference> {
    let path = paths::claude_md_path(root);
    if !path.exists() {
        return Ok(ClaudeReference::NoClaudeMd);
    }
    let content = std::fs::read_to_string(&path)?;
    if content.contains(paths::AGENTS_MD) {
        return Ok(ClaudeReference::AlreadyPresent);
    }
    io::append_text(&path, AGENTS_REFERENCE)?;
    Ok(ClaudeReference::Added)
}

// ---------------------------------------------------------------------------
// Onboarding detection
// ---------------------------------------------------------------------------

/// True once the PROJECT CONTEXT section carries a real Project Overview,
/// i.e. more than three lines between `### Project Overview` and `### Tech Stack`.
pub fn is_onboarded(content: &str) -> bool {
    if !content.contains(PROJECT_CONTEXT_MARKER) {
        return false;
    }
    let (Some(overview), Some(tech)) = (
        content.find("### Project Overview"),
        content.find("### Tech Stack"),
    ) else {
        return false;
    };
    if overview >= tech {
        return false;
    }
    content[overview..tech].trim().split('\n').count() > 3
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
