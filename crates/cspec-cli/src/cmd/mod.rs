pub mod init;
pub mod onboard;
pub mod specs;
pub mod status;
pub mod templates;
pub mod update;
pub mod validate;
pub mod work;

use cspec_core::{io::InstallOutcome, paths, validate::Verdict};
use std::path::Path;

// ---------------------------------------------------------------------------
// CheckFailed: typed non-zero exits for commands that report, then fail
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum CheckFailed {
    Unhealthy,
    Verdict(Verdict),
}

impl CheckFailed {
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckFailed::Unhealthy => 1,
            CheckFailed::Verdict(v) => v.exit_code(),
        }
    }
}

impl std::fmt::Display for CheckFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckFailed::Unhealthy => {
                write!(f, "project has missing pieces: run 'cspec init'")
            }
            CheckFailed::Verdict(v) => write!(f, "validation failed ({v})"),
        }
    }
}

impl std::error::Error for CheckFailed {}

// ---------------------------------------------------------------------------
// Shared scaffolding helpers
// ---------------------------------------------------------------------------

/// Install the bundled slash commands. Returns how many files were written.
pub fn install_slash_commands(root: &Path, force: bool) -> anyhow::Result<usize> {
    let dir = paths::claude_commands_dir(root);
    cspec_core::io::ensure_dir(&dir)?;

    let mut written = 0;
    for (filename, content) in crate::assets::SLASH_COMMANDS {
        let stem = filename.trim_end_matches(".md");
        match cspec_core::io::install_file(&dir.join(filename), content.as_bytes(), force)? {
            InstallOutcome::Skipped => {
                println!("  exists:  /cspec:{stem} (use --force to overwrite)")
            }
            InstallOutcome::Created => {
                println!("  created: /cspec:{stem}");
                written += 1;
            }
            InstallOutcome::Overwritten => {
                println!("  updated: /cspec:{stem}");
                written += 1;
            }
        }
    }
    Ok(written)
}

pub fn report_claude_reference(root: &Path) -> anyhow::Result<()> {
    use cspec_core::agents_md::{add_claude_reference, ClaudeReference};
    match add_claude_reference(root)? {
        ClaudeReference::Added => println!("  updated: CLAUDE.md (references AGENTS.md)"),
        ClaudeReference::AlreadyPresent => println!("  exists:  CLAUDE.md already references AGENTS.md"),
        ClaudeReference::NoClaudeMd => println!("  skipped: CLAUDE.md not found"),
    }
    Ok(())
}

/// `", "`-joined list for "available: ..." hints, or `None` when empty.
pub fn available_hint(names: &[String]) -> Option<String> {
    (!names.is_empty()).then(|| names.join(", "))
}
