use crate::error::Result;
use crate::paths;
use serde::Deserialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// ValidationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationConfig {
    /// Treat context-completeness warnings as failures.
    #[serde(default)]
    pub strict: bool,
    /// File name of the issue document inside a work item directory.
    #[serde(default = "default_issue_file")]
    pub issue_file: String,
}

fn default_issue_file() -> String {
    paths::ISSUE_FILE.to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict: false,
            issue_file: default_issue_file(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

/// Optional project settings read from `cspec/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Load the project config, falling back to defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
