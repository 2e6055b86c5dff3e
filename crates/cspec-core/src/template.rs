//! Issue templates in GitHub issue-form YAML.
//!
//! A small set ships inside the binary; `.github/ISSUE_TEMPLATE/<name>.yml`
//! in the project overrides or extends them.

use crate::error::{CspecError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const TEMPLATE_EXTENSION: &str = "yml";

/// Template chooser settings GitHub keeps beside the forms; not a form itself.
pub const CHOOSER_CONFIG: &str = "config";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueTemplate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub body: Vec<TemplateField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub attributes: FieldAttributes,
    #[serde(default)]
    pub validations: FieldValidations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldAttributes {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidations {
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateOrigin {
    Builtin,
    Project,
}

/// A named template together with its raw YAML source.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateEntry {
    pub name: String,
    pub origin: TemplateOrigin,
    #[serde(skip)]
    pub source: String,
    pub template: IssueTemplate,
}

impl TemplateEntry {
    fn parse(name: &str, origin: TemplateOrigin, source: String) -> Result<Self> {
        let template: IssueTemplate = serde_yaml::from_str(&source)?;
        Ok(Self {
            name: name.to_string(),
            origin,
            source,
            template,
        })
    }

    /// The YAML source re-encoded as pretty JSON, keys and all.
    pub fn to_json(&self) -> Result<String> {
        let value: serde_yaml::Value = serde_yaml::from_str(&self.source)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// A fillable markdown skeleton an agent can complete into an issue.
    pub fn render_markdown(&self) -> String {
        let title = self
            .template
            .name
            .clone()
            .unwrap_or_else(|| title_case(&self.name));
        let mut lines = vec![format!("# {title}"), String::new()];
        if let Some(desc) = self.template.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("> {desc}"));
            lines.push(String::new());
        }

        for field in &self.template.body {
            let attrs = &field.attributes;
            let marker = if field.validations.required { " *" } else { "" };
            lines.push(format!("## {}{marker}", attrs.label));

            if let Some(desc) = attrs.description.as_deref().filter(|d| !d.is_empty()) {
                lines.push(format!("<!-- {desc} -->"));
            }

            if field.field_type == "dropdown" && !attrs.options.is_empty() {
                let opts = attrs.options.join(", ");
                lines.push(format!("<!-- Options: {opts} -->"));
                lines.push(String::new());
                lines.push(format!("[SELECT: {opts}]"));
            } else if let Some(ph) = attrs.placeholder.as_deref().filter(|p| !p.is_empty()) {
                lines.push(String::new());
                lines.push(ph.trim_end().to_string());
            } else {
                lines.push(String::new());
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn builtin_templates() -> &'static [(&'static str, &'static str)] {
    &[
        ("bug", BUG_TEMPLATE),
        ("enhancement", ENHANCEMENT_TEMPLATE),
        ("feature", FEATURE_TEMPLATE),
        ("refactor", REFACTOR_TEMPLATE),
    ]
}

fn project_templates(root: &Path) -> Result<BTreeMap<String, String>> {
    let dir = paths::templates_dir(root);
    let mut out = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(out);
    }
    for entry in std::fs::read_dir(&dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
            continue;
        }
        if let Some(stem) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| *s != CHOOSER_CONFIG)
        {
            out.insert(stem.to_string(), std::fs::read_to_string(&path)?);
        }
    }
    Ok(out)
}

/// All templates by name. Project files shadow built-ins of the same name.
pub fn list_templates(root: &Path) -> Result<Vec<TemplateEntry>> {
    let mut sources: BTreeMap<String, (TemplateOrigin, String)> = builtin_templates()
        .iter()
        .map(|(name, src)| (name.to_string(), (TemplateOrigin::Builtin, src.to_string())))
        .collect();
    for (name, src) in project_templates(root)? {
        sources.insert(name, (TemplateOrigin::Project, src));
    }
    sources
        .into_iter()
        .map(|(name, (origin, src))| TemplateEntry::parse(&name, origin, src))
        .collect()
}

pub fn load_template(root: &Path, name: &str) -> Result<TemplateEntry> {
    if name == CHOOSER_CONFIG || paths::validate_slug(name).is_err() {
        return Err(CspecError::TemplateNotFound(name.to_string()));
    }
    let path = paths::templates_dir(root).join(format!("{name}.{TEMPLATE_EXTENSION}"));
    if path.is_file() {
        return TemplateEntry::parse(name, TemplateOrigin::Project, std::fs::read_to_string(&path)?);
    }
    builtin_templates()
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(n, src)| TemplateEntry::parse(n, TemplateOrigin::Builtin, src.to_string()))
        .unwrap_or_else(|| Err(CspecError::TemplateNotFound(name.to_string())))
}

// ---------------------------------------------------------------------------
// Built-in templates
// ---------------------------------------------------------------------------

const FEATURE_TEMPLATE: &str = r#"name: Feature
description: A new capability that does not exist yet
labels: [feature]
body:
  - type: textarea
    attributes:
      label: Problem
      description: What problem does this solve, and for whom?
      placeholder: |
        Users cannot ...
    validations:
      required: true
  - type: dropdown
    attributes:
      label: Impact
      description: Consumer-visible effect (breaking → major, additive → minor, invisible → patch)
      options: [breaking, additive, invisible]
    validations:
      required: true
  - type: textarea
    attributes:
      label: Scope
      placeholder: |
        ### In Scope
        - ...

        ### Out of Scope
        - ...
    validations:
      required: true
  - type: textarea
    attributes:
      label: Acceptance Criteria
      placeholder: |
        - [ ] ...
    validations:
      required: true
  - type: input
    attributes:
      label: Problem Statement Context
      description: Path to the problem-statement context document
"#;

const BUG_TEMPLATE: &str = r#"name: Bug
description: Something behaves differently than specified
labels: [bug]
body:
  - type: textarea
    attributes:
      label: Problem
      description: Observed versus expected behavior
      placeholder: |
        Expected: ...
        Actual: ...
    validations:
      required: true
  - type: textarea
    attributes:
      label: Reproduction
      placeholder: |
        1. ...
  - type: input
    attributes:
      label: Root Cause Analysis
      description: Path to the rca context document
    validations:
      required: true
  - type: textarea
    attributes:
      label: Scope
      placeholder: |
        ### In Scope
        - ...
    validations:
      required: true
  - type: textarea
    attributes:
      label: Acceptance Criteria
      placeholder: |
        - [ ] The reproduction no longer fails
    validations:
      required: true
"#;

const ENHANCEMENT_TEMPLATE: &str = r#"name: Enhancement
description: Improve an existing capability
labels: [enhancement]
body:
  - type: textarea
    attributes:
      label: Problem
      placeholder: |
        Today ... ; we want ...
    validations:
      required: true
  - type: input
    attributes:
      label: Current Behavior
      description: Path to the current-behavior context document
  - type: input
    attributes:
      label: Delta Description
      description: Path to the delta-description context document
  - type: dropdown
    attributes:
      label: Impact
      options: [breaking, additive, invisible]
    validations:
      required: true
  - type: textarea
    attributes:
      label: Scope
      placeholder: |
        ### In Scope
        - ...
    validations:
      required: true
  - type: textarea
    attributes:
      label: Acceptance Criteria
      placeholder: |
        - [ ] ...
    validations:
      required: true
"#;

const REFACTOR_TEMPLATE: &str = r#"name: Refactor
description: Restructure code without changing observable behavior
labels: [refactor]
body:
  - type: textarea
    attributes:
      label: Problem
      description: What makes the current structure costly?
    validations:
      required: true
  - type: input
    attributes:
      label: Architecture Scope
      description: Path to the architecture-scope context document
  - type: input
    attributes:
      label: Behavioral Equivalence
      description: How equivalence will be demonstrated (behavioral-equivalence context)
  - type: textarea
    attributes:
      label: Scope
      placeholder: |
        ### In Scope
        - ...
    validations:
      required: true
  - type: textarea
    attributes:
      label: Acceptance Criteria
      placeholder: |
        - [ ] Existing test suite passes unchanged
    validations:
      required: true
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_templates_parse() {
        let dir = TempDir::new().unwrap();
        let all = list_templates(dir.path()).unwrap();
        let names: Vec<_> = all.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["bug", "enhancement", "feature", "refactor"]);
        assert!(all.iter().all(|t| t.origin == TemplateOrigin::Builtin));
        assert!(all.iter().all(|t| !t.template.body.is_empty()));
    }

    #[test]
    fn project_template_shadows_builtin() {
        let dir = TempDir::new().unwrap();
        let tdir = dir.path().join(".github/ISSUE_TEMPLATE");
        std::fs::create_dir_all(&tdir).unwrap();
        std::fs::write(tdir.join("bug.yml"), "description: house style\n").unwrap();
        std::fs::write(tdir.join("spike.yml"), "name: Spike\n").unwrap();
        std::fs::write(tdir.join("notes.txt"), "ignored").unwrap();
        std::fs::write(tdir.join("config.yml"), "blank_issues_enabled: false\n").unwrap();

        let all = list_templates(dir.path()).unwrap();
        assert_eq!(all.len(), 5);
        let bug = load_template(dir.path(), "bug").unwrap();
        assert_eq!(bug.origin, TemplateOrigin::Project);
        assert_eq!(bug.template.description.as_deref(), Some("house style"));
        assert_eq!(load_template(dir.path(), "spike").unwrap().template.name.as_deref(), Some("Spike"));
        assert!(matches!(
            load_template(dir.path(), "config"),
            Err(CspecError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_template(dir.path(), "nope").unwrap_err();
        assert!(matches!(err, CspecError::TemplateNotFound(n) if n == "nope"));
    }

    #[test]
    fn markdown_rendering() {
        let source = r#"description: Short form
body:
  - type: dropdown
    attributes:
      label: Impact
      description: pick one
      options: [breaking, additive]
    validations:
      required: true
  - type: textarea
    attributes:
      label: Notes
      placeholder: "- item\n\n"
  - type: input
    attributes:
      label: Link
"#;
        let entry = TemplateEntry::parse("quick-note", TemplateOrigin::Project, source.into()).unwrap();
        assert_eq!(
            entry.render_markdown(),
            "# Quick-Note\n\n> Short form\n\n## Impact *\n<!-- pick one -->\n<!-- Options: breaking, additive -->\n\n[SELECT: breaking, additive]\n\n## Notes\n\n- item\n\n## Link\n\n"
        );
    }

    #[test]
    fn json_keeps_every_key() {
        let dir = TempDir::new().unwrap();
        let feature = load_template(dir.path(), "feature").unwrap();
        let json: serde_json::Value = serde_json::from_str(&feature.to_json().unwrap()).unwrap();
        assert_eq!(json["name"], "Feature");
        assert_eq!(json["labels"][0], "feature");
        assert_eq!(json["body"][1]["type"], "dropdown");
    }
}
