//! Typed issue frontmatter and its accumulating decoder.
//!
//! Decoding never stops at the first problem: every field is checked, the
//! cross-field rules run for whatever decoded cleanly, and all violations are
//! returned together in a [`SchemaError`].

use crate::types::{Impact, Nature, Status, VersionClass};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Context references
// ---------------------------------------------------------------------------

/// Typed pointer to a supporting document. `path` is never resolved here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextReference {
    #[serde(rename = "type")]
    pub context_type: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueContext {
    #[serde(default)]
    pub required: Vec<ContextReference>,
    #[serde(default)]
    pub recommended: Vec<ContextReference>,
}

impl IssueContext {
    /// True if any `required` reference carries `context_type`. Duplicates count once.
    pub fn references(&self, context_type: &str) -> bool {
        self.required.iter().any(|r| r.context_type == context_type)
    }
}

// ---------------------------------------------------------------------------
// IssueFrontmatter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueFrontmatter {
    pub id: String,
    pub title: String,
    pub nature: Nature,
    pub impact: Impact,
    pub version: VersionClass,
    pub status: Status,
    pub created: NaiveDate,
    pub updated: NaiveDate,
    pub context: IssueContext,
    pub depends_on: Vec<String>,
    pub blocks: Vec<String>,
}

impl IssueFrontmatter {
    /// Decode a YAML mapping, collecting every violation in one pass.
    pub fn from_mapping(map: &Mapping) -> Result<Self, SchemaError> {
        Decoder::new(map).decode()
    }

    /// Context types recommended for this issue's nature that no
    /// `context.required` entry references, in table order.
    pub fn missing_context(&self) -> Vec<&'static str> {
        self.nature
            .required_context()
            .iter()
            .copied()
            .filter(|t| !self.context.references(t))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SchemaError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaViolation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("frontmatter has {} schema violation(s)", .violations.len())]
pub struct SchemaError {
    pub violations: Vec<SchemaViolation>,
}

// ---------------------------------------------------------------------------
// Issue id pattern
// ---------------------------------------------------------------------------

static ISSUE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn issue_id_re() -> &'static Regex {
    ISSUE_ID_RE.get_or_init(|| Regex::new(r"^ISSUE-[0-9]{3,}$").unwrap())
}

pub fn is_valid_issue_id(id: &str) -> bool {
    issue_id_re().is_match(id)
}

static DATE_RE: OnceLock<Regex> = OnceLock::new();

/// Strict `YYYY-MM-DD`; chrono alone accepts unpadded fields and a sign.
fn date_re() -> &'static Regex {
    DATE_RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap())
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

struct Decoder<'a> {
    map: &'a Mapping,
    violations: Vec<SchemaViolation>,
}

impl<'a> Decoder<'a> {
    fn new(map: &'a Mapping) -> Self {
        Self {
            map,
            violations: Vec::new(),
        }
    }

    fn violation(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(SchemaViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Explicit `null` is treated the same as an absent key.
    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.map.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    fn string_value(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.violation(field, format!("expected a string, got {}", value_kind(other)));
                None
            }
        }
    }

    fn required_str(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            Some(value) => self.string_value(field, value),
            None => {
                self.violation(field, "field required");
                None
            }
        }
    }

    fn token<T: FromStr>(&mut self, field: &str, raw: String, expected: String) -> Option<T> {
        match raw.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                self.violation(
                    field,
                    format!("invalid value '{raw}': expected one of {expected}"),
                );
                None
            }
        }
    }

    fn id(&mut self) -> Option<String> {
        let id = self.required_str("id")?;
        if !is_valid_issue_id(&id) {
            self.violation(
                "id",
                format!("'{id}' does not match ISSUE-NNN (ISSUE- followed by 3 or more digits)"),
            );
            return None;
        }
        Some(id)
    }

    fn title(&mut self) -> Option<String> {
        let title = self.required_str("title")?;
        let len = title.chars().count();
        if len == 0 {
            self.violation("title", "must not be empty");
            return None;
        }
        if len > TITLE_MAX_CHARS {
            self.violation(
                "title",
                format!("must be at most {TITLE_MAX_CHARS} characters (got {len})"),
            );
            return None;
        }
        Some(title)
    }

    fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let raw = self.required_str(field)?;
        let parsed = date_re()
            .is_match(&raw)
            .then(|| NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok())
            .flatten();
        match parsed {
            Some(d) => Some(d),
            None => {
                self.violation(field, format!("invalid date '{raw}': expected YYYY-MM-DD"));
                None
            }
        }
    }

    fn status(&mut self) -> Option<Status> {
        let Some(value) = self.get("status") else {
            return Some(Status::default());
        };
        let raw = self.string_value("status", value)?;
        self.token("status", raw, Status::expected())
    }

    fn string_list(&mut self, field: &str) -> Vec<String> {
        let Some(value) = self.get(field) else {
            return Vec::new();
        };
        let Value::Sequence(items) = value else {
            self.violation(field, format!("expected a list, got {}", value_kind(value)));
            return Vec::new();
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if let Some(s) = self.string_value(&format!("{field}[{i}]"), item) {
                out.push(s);
            }
        }
        out
    }

    fn references(&mut self, field: &str, value: Option<&Value>) -> Vec<ContextReference> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Vec::new();
        };
        let Value::Sequence(items) = value else {
            self.violation(field, format!("expected a list, got {}", value_kind(value)));
            return Vec::new();
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let prefix = format!("{field}[{i}]");
            let Value::Mapping(entry) = item else {
                self.violation(&prefix, format!("expected a mapping, got {}", value_kind(item)));
                continue;
            };
            let part = |this: &mut Self, key: &str| -> Option<String> {
                let name = format!("{prefix}.{key}");
                match entry.get(key).filter(|v| !v.is_null()) {
                    Some(v) => this.string_value(&name, v),
                    None => {
                        this.violation(name, "field required");
                        None
                    }
                }
            };
            let context_type = part(self, "type");
            let path = part(self, "path");
            if let (Some(context_type), Some(path)) = (context_type, path) {
                out.push(ContextReference { context_type, path });
            }
        }
        out
    }

    fn context(&mut self) -> IssueContext {
        let Some(value) = self.get("context") else {
            return IssueContext::default();
        };
        let Value::Mapping(ctx) = value else {
            self.violation("context", format!("expected a mapping, got {}", value_kind(value)));
            return IssueContext::default();
        };
        IssueContext {
            required: self.references("context.required", ctx.get("required")),
            recommended: self.references("context.recommended", ctx.get("recommended")),
        }
    }

    fn decode(mut self) -> Result<IssueFrontmatter, SchemaError> {
        let id = self.id();
        let title = self.title();
        let nature = self
            .required_str("nature")
            .and_then(|raw| self.token::<Nature>("nature", raw, Nature::expected()));
        let impact = self
            .required_str("impact")
            .and_then(|raw| self.token::<Impact>("impact", raw, Impact::expected()));
        let version = self
            .required_str("version")
            .and_then(|raw| self.token::<VersionClass>("version", raw, VersionClass::expected()));
        let status = self.status();
        let created = self.date("created");
        let updated = self.date("updated");
        let context = self.context();
        let depends_on = self.string_list("depends_on");
        let blocks = self.string_list("blocks");

        if let (Some(impact), Some(version)) = (impact, version) {
            let expected = impact.version();
            if version != expected {
                self.violation(
                    "version",
                    format!(
                        "version mismatch: impact '{impact}' requires version '{expected}', got '{version}'"
                    ),
                );
            }
        }

        if let (Some(created), Some(updated)) = (created, updated) {
            if updated < created {
                self.violation(
                    "updated",
                    format!("updated date ({updated}) cannot be before created date ({created})"),
                );
            }
        }

        match (id, title, nature, impact, version, status, created, updated) {
            (
                Some(id),
                Some(title),
                Some(nature),
                Some(impact),
                Some(version),
                Some(status),
                Some(created),
                Some(updated),
            ) if self.violations.is_empty() => Ok(IssueFrontmatter {
                id,
                title,
                nature,
                impact,
                version,
                status,
                created,
                updated,
                context,
                depends_on,
                blocks,
            }),
            _ => Err(SchemaError {
                violations: self.violations,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
