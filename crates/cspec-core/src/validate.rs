//! Issue document validation.
//!
//! Pipeline: frontmatter extraction → YAML decode → schema validation →
//! body section scan → nature-specific context completeness → verdict.
//! The first two steps are fatal; everything after them accumulates.
//!
//! [`validate_issue`] is a pure function of its input and the static schema
//! tables, so it can be called from any number of threads at once.

use crate::schema::{value_kind, IssueFrontmatter, SchemaViolation};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fmt;
use tracing::debug;

pub const FRONTMATTER_DELIMITER: &str = "---";

pub const PROBLEM_HEADING: &str = "Problem";
pub const SCOPE_HEADING: &str = "Scope";
pub const IN_SCOPE_HEADING: &str = "In Scope";
pub const ACCEPTANCE_HEADING: &str = "Acceptance Criteria";

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingFrontmatter,
    MalformedYaml,
    SchemaViolation,
    BodySectionViolation,
    ContextCompleteness,
}

impl DiagnosticKind {
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            DiagnosticKind::MissingFrontmatter | DiagnosticKind::MalformedYaml
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl From<SchemaViolation> for Diagnostic {
    fn from(v: SchemaViolation) -> Self {
        Diagnostic::new(DiagnosticKind::SchemaViolation, v.message).with_field(v.field)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    PassWithWarnings,
    Fail,
    /// No errors, but warnings were present and strict mode was on.
    FailStrict,
}

impl Verdict {
    pub fn aggregate(errors: &[Diagnostic], warnings: &[Diagnostic], strict: bool) -> Self {
        if !errors.is_empty() {
            Verdict::Fail
        } else if warnings.is_empty() {
            Verdict::Pass
        } else if strict {
            Verdict::FailStrict
        } else {
            Verdict::PassWithWarnings
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Verdict::Pass | Verdict::PassWithWarnings)
    }

    pub fn exit_code(self) -> i32 {
        if self.is_pass() {
            0
        } else {
            1
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "pass",
            Verdict::PassWithWarnings => "pass_with_warnings",
            Verdict::Fail => "fail",
            Verdict::FailStrict => "fail_strict",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Treat warnings as failing conditions.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub verdict: Verdict,
    pub strict: bool,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<IssueFrontmatter>,
}

impl ValidationReport {
    fn fatal(kind: DiagnosticKind, message: String, options: ValidateOptions) -> Self {
        Self {
            verdict: Verdict::Fail,
            strict: options.strict,
            errors: vec![Diagnostic::new(kind, message)],
            warnings: Vec::new(),
            frontmatter: None,
        }
    }

    /// True when the pipeline stopped before schema validation.
    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(|d| d.kind.is_fatal())
    }
}

// ---------------------------------------------------------------------------
// Frontmatter extraction
// ---------------------------------------------------------------------------

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == FRONTMATTER_DELIMITER
}

/// Split a document into its frontmatter block and body.
///
/// The first line must be `---`; the block runs to the next `---` line. The
/// body is everything after that closing line. Returns `None` when either
/// delimiter is missing.
pub fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if !is_delimiter(first) || !first.ends_with('\n') {
        return None;
    }
    let start = first.len();
    let mut offset = start;
    for line in lines {
        if is_delimiter(line) {
            return Some((&text[start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_mapping(raw: &str) -> Result<Mapping, String> {
    if raw.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(other) => Err(format!(
            "frontmatter must be a mapping, got {}",
            value_kind(&other)
        )),
        Err(e) => Err(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Body sections
// ---------------------------------------------------------------------------

/// `(level, title)` for an ATX heading line such as `## Scope`.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.len() - line.trim_start_matches('#').len();
    if level == 0 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((level, rest.trim()))
}

/// Lines under the heading `title` at `level`, stopping at the next heading
/// of the same or a shallower level.
fn section<'l, 'a>(lines: &'l [&'a str], level: usize, title: &str) -> Option<&'l [&'a str]> {
    let start = lines
        .iter()
        .position(|l| heading(l) == Some((level, title)))?
        + 1;
    let len = lines[start..]
        .iter()
        .position(|l| matches!(heading(l), Some((lv, _)) if lv <= level))
        .unwrap_or(lines.len() - start);
    Some(&lines[start..start + len])
}

fn is_list_item(line: &str) -> bool {
    line.trim_start().starts_with("- ")
}

fn has_content(lines: &[&str]) -> bool {
    lines.iter().any(|l| !l.trim().is_empty())
}

fn body_error(message: &str) -> Diagnostic {
    Diagnostic::new(DiagnosticKind::BodySectionViolation, message)
}

/// Check the markdown body for the Problem, Scope/In Scope and Acceptance
/// Criteria sections, in that order.
pub fn check_body(body: &str) -> Vec<Diagnostic> {
    let lines: Vec<&str> = body.lines().collect();
    let mut errors = Vec::new();

    match section(&lines, 2, PROBLEM_HEADING) {
        None => errors.push(body_error("missing Problem section")),
        Some(content) if !has_content(content) => {
            errors.push(body_error("Problem section is empty"))
        }
        Some(_) => {}
    }

    match section(&lines, 2, SCOPE_HEADING) {
        None => errors.push(body_error("missing Scope section")),
        Some(scope) => match section(scope, 3, IN_SCOPE_HEADING) {
            None => errors.push(body_error("missing In Scope subsection")),
            Some(items) if !items.iter().any(|l| is_list_item(l)) => {
                errors.push(body_error("no in-scope items defined"))
            }
            Some(_) => {}
        },
    }

    match section(&lines, 2, ACCEPTANCE_HEADING) {
        None => errors.push(body_error("missing Acceptance Criteria section")),
        Some(items) if !items.iter().any(|l| is_list_item(l)) => {
            errors.push(body_error("no acceptance criteria defined"))
        }
        Some(_) => {}
    }

    errors
}

// ---------------------------------------------------------------------------
// Context completeness
// ---------------------------------------------------------------------------

/// Advisory warnings for context types the issue's nature expects but
/// `context.required` does not reference.
pub fn check_context(frontmatter: &IssueFrontmatter) -> Vec<Diagnostic> {
    frontmatter
        .missing_context()
        .into_iter()
        .map(|t| {
            Diagnostic::new(
                DiagnosticKind::ContextCompleteness,
                format!(
                    "context type '{t}' not referenced (recommended for {} issues)",
                    frontmatter.nature
                ),
            )
            .with_field("context.required")
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn validate_issue(text: &str, options: ValidateOptions) -> ValidationReport {
    let Some((raw_frontmatter, body)) = split_frontmatter(text) else {
        debug!("document has no frontmatter block");
        return ValidationReport::fatal(
            DiagnosticKind::MissingFrontmatter,
            "missing frontmatter: document must begin with a '---' delimited YAML block"
                .to_string(),
            options,
        );
    };

    let map = match parse_mapping(raw_frontmatter) {
        Ok(map) => map,
        Err(msg) => {
            debug!(error = %msg, "frontmatter is not valid YAML");
            return ValidationReport::fatal(
                DiagnosticKind::MalformedYaml,
                format!("malformed YAML frontmatter: {msg}"),
                options,
            );
        }
    };

    let mut errors: Vec<Diagnostic> = Vec::new();
    let mut warnings: Vec<Diagnostic> = Vec::new();

    let frontmatter = match IssueFrontmatter::from_mapping(&map) {
        Ok(fm) => Some(fm),
        Err(e) => {
            debug!(violations = e.violations.len(), "schema validation failed");
            errors.extend(e.violations.into_iter().map(Diagnostic::from));
            None
        }
    };

    errors.extend(check_body(body));

    // Without a decoded nature there is no table row to check against.
    if let Some(fm) = &frontmatter {
        warnings.extend(check_context(fm));
    }

    let verdict = Verdict::aggregate(&errors, &warnings, options.strict);
    debug!(
        %verdict,
        errors = errors.len(),
        warnings = warnings.len(),
        "issue validated"
    );

    ValidationReport {
        verdict,
        strict: options.strict,
        errors,
        warnings,
        frontmatter,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
