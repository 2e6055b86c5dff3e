use super::CheckFailed;
use crate::output::print_json;
use anyhow::Context;
use cspec_core::{config::Config, workspace::project_health};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load cspec/config.yaml")?;
    let health = project_health(root, &config.validation.issue_file)?;

    if json {
        print_json(&health)?;
    } else {
        let rule = "=".repeat(40);
        println!("cspec project status");
        println!("{rule}");

        println!("\nStructure:");
        for check in &health.checks {
            let mark = if check.present { "[OK]" } else { "[MISSING]" };
            println!("  {mark:<9} {}", check.name);
        }

        println!();
        match &health.specs {
            Some(specs) => {
                println!("Permanent specs: {}", specs.len());
                for spec in specs {
                    println!("  - {}/spec.md", spec.feature);
                }
            }
            None => println!("Permanent specs: (directory missing)"),
        }

        println!();
        match &health.work {
            Some(items) => {
                println!("Work in progress: {}", items.len());
                for item in items {
                    println!("  - {}/ ({})", item.slug, item.summary());
                }
            }
            None => println!("Work in progress: (directory missing)"),
        }

        println!("\n{rule}");
        if health.is_healthy() {
            println!("Status: HEALTHY");
        } else {
            println!("Status: ISSUES FOUND");
        }
    }

    if !health.is_healthy() {
        return Err(CheckFailed::Unhealthy.into());
    }
    Ok(())
}
