use crate::output::{print_json, print_table};
use clap::Subcommand;
use cspec_core::{
    workspace::{available_specs, list_specs, load_spec},
    CspecError,
};
use serde::Serialize;
use std::path::Path;

#[derive(Subcommand)]
pub enum SpecsSubcommand {
    /// List permanent feature specs
    List,

    /// Print a feature spec
    Show {
        /// Feature name (directory under cspec/specs/)
        feature: String,
    },
}

pub fn run(root: &Path, subcmd: SpecsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        SpecsSubcommand::List => list(root, json),
        SpecsSubcommand::Show { feature } => show(root, &feature, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let specs = list_specs(root)?;
    if json {
        return print_json(&specs);
    }
    if specs.is_empty() {
        println!("No specs found.");
        println!("\nCreate one by starting work: /cspec:work-start <slug> <description>");
        return Ok(());
    }

    let rows = specs
        .iter()
        .map(|s| {
            vec![
                s.feature.clone(),
                s.title.clone(),
                s.diagrams.len().to_string(),
            ]
        })
        .collect();
    print_table(&["FEATURE", "TITLE", "DIAGRAMS"], rows);
    Ok(())
}

#[derive(Serialize)]
struct SpecDetail<'a> {
    #[serde(flatten)]
    entry: &'a cspec_core::workspace::SpecEntry,
    content: &'a str,
}

fn show(root: &Path, feature: &str, json: bool) -> anyhow::Result<()> {
    let (entry, content) = match load_spec(root, feature) {
        Ok(found) => found,
        Err(e @ (CspecError::SpecNotFound(_) | CspecError::InvalidSlug(_))) => {
            match super::available_hint(&available_specs(root)) {
                Some(hint) => anyhow::bail!("{e} (available specs: {hint})"),
                None => return Err(e.into()),
            }
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        return print_json(&SpecDetail {
            entry: &entry,
            content: &content,
        });
    }

    println!("{}", content.trim_end());
    if !entry.diagrams.is_empty() {
        println!("\n---\nDiagrams:");
        for d in &entry.diagrams {
            println!("  - {d}");
        }
    }
    Ok(())
}
