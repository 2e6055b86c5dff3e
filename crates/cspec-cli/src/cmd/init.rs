use super::{install_slash_commands, report_claude_reference};
use crate::assets::{AGENTS_MD_TEMPLATE, BANNER};
use anyhow::Context;
use cspec_core::{
    io::{self, InstallOutcome},
    paths,
    template::{builtin_templates, TEMPLATE_EXTENSION},
};
use std::path::Path;

pub fn run(root: &Path, force: bool) -> anyhow::Result<()> {
    println!("{BANNER}");
    println!("Initializing cspec in: {}", root.display());

    // 1. Directory tree
    let dirs = [
        paths::SPECS_DIR,
        paths::WORK_DIR,
        paths::TEMPLATES_DIR,
        paths::CLAUDE_COMMANDS_DIR,
    ];
    for dir in dirs {
        let p = root.join(dir);
        let created =
            io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
        if created {
            println!("  created: {dir}/");
        } else {
            println!("  exists:  {dir}/");
        }
    }

    // 2. Slash commands
    println!("\nSlash commands:");
    install_slash_commands(root, force)?;

    // 3. Issue templates, editable per project
    println!("\nIssue templates:");
    install_issue_templates(root, force)?;

    // 4. AGENTS.md and the CLAUDE.md pointer
    println!("\nAgent configuration:");
    let agents = paths::agents_md_path(root);
    match io::install_file(&agents, AGENTS_MD_TEMPLATE.as_bytes(), force)
        .context("failed to write AGENTS.md")?
    {
        InstallOutcome::Created => println!("  created: AGENTS.md"),
        InstallOutcome::Overwritten => println!("  updated: AGENTS.md (--force)"),
        InstallOutcome::Skipped => println!("  exists:  AGENTS.md (use --force to overwrite)"),
    }
    report_claude_reference(root)?;

    println!("\ncspec initialized successfully.");
    println!("  cspec/specs/  permanent feature specs (source of truth)");
    println!("  cspec/work/   one directory per change in flight");
    println!("\nNext: /cspec:work-start <slug> <description>");
    println!("Slash commands are namespaced as cspec:<command>.");

    Ok(())
}

fn install_issue_templates(root: &Path, force: bool) -> anyhow::Result<()> {
    let dir = paths::templates_dir(root);
    for (name, source) in builtin_templates() {
        let filename = format!("{name}.{TEMPLATE_EXTENSION}");
        match io::install_file(&dir.join(&filename), source.as_bytes(), force)? {
            InstallOutcome::Created => println!("  created: {}/{filename}", paths::TEMPLATES_DIR),
            InstallOutcome::Overwritten => {
                println!("  updated: {}/{filename}", paths::TEMPLATES_DIR)
            }
            InstallOutcome::Skipped => println!("  exists:  {}/{filename}", paths::TEMPLATES_DIR),
        }
    }
    Ok(())
}
