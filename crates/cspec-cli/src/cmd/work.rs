use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use cspec_core::{
    config::Config,
    paths,
    workspace::{available_work_items, list_work_items, load_work_item, WorkItem},
    CspecError,
};
use std::path::Path;

/// Lines of `issue.md` shown by `work show`.
const ISSUE_PREVIEW_LINES: usize = 10;

#[derive(Subcommand)]
pub enum WorkSubcommand {
    /// List work items in progress
    List,

    /// Show the contents of a work item
    Show {
        /// Work item slug (directory under cspec/work/)
        slug: String,
    },
}

pub fn run(root: &Path, subcmd: WorkSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load cspec/config.yaml")?;
    let issue_file = config.validation.issue_file.as_str();
    match subcmd {
        WorkSubcommand::List => list(root, issue_file, json),
        WorkSubcommand::Show { slug } => show(root, &slug, issue_file, json),
    }
}

fn list(root: &Path, issue_file: &str, json: bool) -> anyhow::Result<()> {
    let items = list_work_items(root, issue_file)?;
    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("No work in progress.");
        println!("\nStart work: /cspec:work-start <slug> <description>");
        return Ok(());
    }

    let rows = items
        .iter()
        .map(|w| vec![w.slug.clone(), w.summary()])
        .collect();
    print_table(&["SLUG", "CONTENTS"], rows);
    Ok(())
}

fn show(root: &Path, slug: &str, issue_file: &str, json: bool) -> anyhow::Result<()> {
    let item = match load_work_item(root, slug, issue_file) {
        Ok(item) => item,
        Err(e @ (CspecError::WorkItemNotFound(_) | CspecError::InvalidSlug(_))) => {
            match super::available_hint(&available_work_items(root)) {
                Some(hint) => anyhow::bail!("{e} (available work items: {hint})"),
                None => return Err(e.into()),
            }
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        return print_json(&item);
    }

    println!("=== Work: {} ===", item.slug);

    if item.has_issue {
        let content = std::fs::read_to_string(paths::issue_path(root, slug, issue_file))?;
        println!("\nIssue ({issue_file}):");
        let lines: Vec<&str> = content.lines().collect();
        for line in lines.iter().take(ISSUE_PREVIEW_LINES) {
            println!("  {line}");
        }
        if lines.len() > ISSUE_PREVIEW_LINES {
            println!("  ...");
        }
    }

    if item.has_proposal {
        println!("\nProposal:");
        println!("  {} exists", paths::PROPOSAL_FILE);
    }

    if !item.specs.is_empty() {
        println!("\nSpecs:");
        for spec in &item.specs {
            let feature = WorkItem::spec_feature(spec);
            println!("  - {spec} -> {}/{feature}/{}", paths::SPECS_DIR, paths::SPEC_FILE);
        }
    }

    if !item.context.is_empty() {
        println!("\nContext:");
        for file in &item.context {
            println!("  - {file}");
        }
    }

    if !item.has_issue && !item.has_proposal && item.specs.is_empty() && item.context.is_empty() {
        println!("\n(empty)");
    }
    Ok(())
}
