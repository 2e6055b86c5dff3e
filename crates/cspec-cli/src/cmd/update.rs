use super::{install_slash_commands, report_claude_reference};
use crate::assets::AGENTS_MD_TEMPLATE;
use anyhow::Context;
use cspec_core::{
    agents_md::{update_agents_md, AgentsMdUpdate},
    paths,
};
use std::path::Path;

/// `cspec update`: refresh slash commands and the managed part of AGENTS.md.
///
/// Requires an initialized project (`.claude/commands/cspec/` must exist).
/// The PROJECT CONTEXT section of AGENTS.md is carried over unless `force`.
pub fn run(root: &Path, force: bool) -> anyhow::Result<()> {
    if !paths::claude_commands_dir(root).is_dir() {
        anyhow::bail!(
            "not initialized: run 'cspec init' first (no {} found in {})",
            paths::CLAUDE_COMMANDS_DIR,
            root.display()
        );
    }

    println!("Updating cspec resources in: {}", root.display());

    println!("\nSlash commands:");
    let refreshed = install_slash_commands(root, force)?;

    println!("\nAGENTS.md:");
    let outcome =
        update_agents_md(root, AGENTS_MD_TEMPLATE, force).context("failed to update AGENTS.md")?;
    match outcome {
        AgentsMdUpdate::Created => println!("  created: AGENTS.md"),
        AgentsMdUpdate::Overwritten => println!("  updated: AGENTS.md (--force)"),
        AgentsMdUpdate::Preserved => println!("  updated: AGENTS.md (PROJECT CONTEXT preserved)"),
        AgentsMdUpdate::Legacy => {
            println!("  updated: AGENTS.md (no PROJECT CONTEXT marker, old content kept at end)")
        }
    }
    report_claude_reference(root)?;

    println!("\ncspec updated ({refreshed} command(s) refreshed).");
    Ok(())
}
