use crate::assets::ONBOARD_PROMPT;
use cspec_core::{agents_md::is_onboarded, paths};
use std::path::Path;

/// Print the onboarding prompt for an agent to execute, unless AGENTS.md
/// already carries a filled-in PROJECT CONTEXT.
pub fn run(root: &Path, force: bool) -> anyhow::Result<()> {
    let agents = paths::agents_md_path(root);
    let onboarded = if agents.is_file() {
        is_onboarded(&std::fs::read_to_string(&agents)?)
    } else {
        false
    };

    if onboarded && !force {
        println!("Project appears to be already onboarded.");
        println!("AGENTS.md PROJECT CONTEXT section has content.");
        println!("\nUse --force to re-run onboarding anyway.");
        return Ok(());
    }
    if onboarded {
        println!("# Re-running onboarding (--force)\n");
    }
    println!("{ONBOARD_PROMPT}");
    Ok(())
}
