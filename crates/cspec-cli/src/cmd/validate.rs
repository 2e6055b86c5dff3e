use super::CheckFailed;
use crate::output::print_json;
use anyhow::Context;
use cspec_core::{
    config::Config,
    paths,
    validate::{validate_issue, ValidateOptions, ValidationReport},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// `cspec validate`: check one issue document and report every problem found.
///
/// Exits non-zero on `fail` and `fail_strict`. Strict mode comes from
/// `--strict` or `validation.strict` in `cspec/config.yaml`.
pub fn run(
    root: &Path,
    path: Option<&Path>,
    work: Option<&str>,
    strict: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load cspec/config.yaml")?;
    let target = resolve_target(root, path, work, &config)?;
    let options = ValidateOptions {
        strict: strict || config.validation.strict,
    };
    debug!(path = %target.display(), strict = options.strict, "validating issue");

    let text = std::fs::read_to_string(&target)
        .with_context(|| format!("failed to read {}", target.display()))?;
    let report = validate_issue(&text, options);

    if json {
        print_json(&report)?;
    } else {
        print_transcript(&target, &report);
    }

    if !report.verdict.is_pass() {
        return Err(CheckFailed::Verdict(report.verdict).into());
    }
    Ok(())
}

fn resolve_target(
    root: &Path,
    path: Option<&Path>,
    work: Option<&str>,
    config: &Config,
) -> anyhow::Result<PathBuf> {
    match (path, work) {
        (Some(p), _) => Ok(p.to_path_buf()),
        (None, Some(slug)) => {
            paths::validate_slug(slug)?;
            Ok(paths::issue_path(root, slug, &config.validation.issue_file))
        }
        (None, None) => anyhow::bail!("nothing to validate: pass a PATH or --work <slug>"),
    }
}

fn print_transcript(target: &Path, report: &ValidationReport) {
    println!("Validating {}", target.display());

    // Fatal reports carry exactly one error and nothing else worth showing.
    if report.is_fatal() {
        for e in &report.errors {
            println!("  error: {e}");
        }
        println!("verdict: {}", report.verdict);
        return;
    }

    if let Some(fm) = &report.frontmatter {
        println!("  {} [{}] {}", fm.id, fm.nature, fm.title);
    }
    if !report.errors.is_empty() {
        println!("\nErrors ({}):", report.errors.len());
        for e in &report.errors {
            println!("  - {e}");
        }
    }
    if !report.warnings.is_empty() {
        println!("\nWarnings ({}):", report.warnings.len());
        for w in &report.warnings {
            println!("  - {w}");
        }
    }
    println!("\nverdict: {}", report.verdict);
}
