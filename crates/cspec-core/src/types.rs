use crate::error::CspecError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Nature
// ---------------------------------------------------------------------------

/// Why a change is being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Nature {
    Feature,
    Enhancement,
    Bug,
    Refactor,
    Optimization,
    Security,
    Hotfix,
    Migration,
    Configuration,
    Deprecation,
    Removal,
}

impl Nature {
    pub fn all() -> &'static [Nature] {
        &[
            Nature::Feature,
            Nature::Enhancement,
            Nature::Bug,
            Nature::Refactor,
            Nature::Optimization,
            Nature::Security,
            Nature::Hotfix,
            Nature::Migration,
            Nature::Configuration,
            Nature::Deprecation,
            Nature::Removal,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Nature::Feature => "feature",
            Nature::Enhancement => "enhancement",
            Nature::Bug => "bug",
            Nature::Refactor => "refactor",
            Nature::Optimization => "optimization",
            Nature::Security => "security",
            Nature::Hotfix => "hotfix",
            Nature::Migration => "migration",
            Nature::Configuration => "configuration",
            Nature::Deprecation => "deprecation",
            Nature::Removal => "removal",
        }
    }

    /// Context document types an issue of this nature is expected to reference
    /// under `context.required`. Missing entries are advisory only.
    pub fn required_context(self) -> &'static [&'static str] {
        match self {
            Nature::Bug => &["rca"],
            Nature::Feature => &["problem-statement"],
            Nature::Enhancement => &["current-behavior", "delta-description"],
            Nature::Refactor => &["architecture-scope", "behavioral-equivalence"],
            Nature::Optimization => &["baseline-metrics", "target-metrics", "measurement-method"],
            Nature::Security => &[
                "vulnerability-report",
                "attack-vector",
                "severity",
                "affected-versions",
            ],
            Nature::Hotfix => &["incident-reference", "impact-assessment", "rollback-plan"],
            Nature::Migration => &[
                "current-state",
                "target-state",
                "transformation-rules",
                "rollback-plan",
            ],
            Nature::Configuration => &["current-config", "new-config", "impact-assessment"],
            Nature::Deprecation => &["sunset-timeline", "migration-path", "consumer-impact"],
            Nature::Removal => &[
                "deprecation-reference",
                "migration-confirmation",
                "impact-assessment",
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Impact
// ---------------------------------------------------------------------------

/// How visible a change is to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Impact {
    Breaking,
    Additive,
    Invisible,
}

impl Impact {
    pub fn all() -> &'static [Impact] {
        &[Impact::Breaking, Impact::Additive, Impact::Invisible]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Breaking => "breaking",
            Impact::Additive => "additive",
            Impact::Invisible => "invisible",
        }
    }

    /// The only version increment an issue with this impact may declare.
    pub fn version(self) -> VersionClass {
        match self {
            Impact::Breaking => VersionClass::Major,
            Impact::Additive => VersionClass::Minor,
            Impact::Invisible => VersionClass::Patch,
        }
    }
}

// ---------------------------------------------------------------------------
// VersionClass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionClass {
    Major,
    Minor,
    Patch,
}

impl VersionClass {
    pub fn all() -> &'static [VersionClass] {
        &[VersionClass::Major, VersionClass::Minor, VersionClass::Patch]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VersionClass::Major => "major",
            VersionClass::Minor => "minor",
            VersionClass::Patch => "patch",
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Issue lifecycle state. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Draft,
    Ready,
    InProgress,
    Blocked,
    Done,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[
            Status::Draft,
            Status::Ready,
            Status::InProgress,
            Status::Blocked,
            Status::Done,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Ready => "ready",
            Status::InProgress => "in-progress",
            Status::Blocked => "blocked",
            Status::Done => "done",
        }
    }
}

// ---------------------------------------------------------------------------
// Display / FromStr
// ---------------------------------------------------------------------------

macro_rules! token_enum {
    ($ty:ident, $kind:literal) => {
        impl $ty {
            /// Comma-separated list of accepted tokens, for error messages.
            pub fn expected() -> String {
                $ty::all()
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = CspecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::all()
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CspecError::InvalidEnum {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

token_enum!(Nature, "nature");
token_enum!(Impact, "impact");
token_enum!(VersionClass, "version");
token_enum!(Status, "status");

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn impact_version_map() {
        assert_eq!(Impact::Breaking.version(), VersionClass::Major);
        assert_eq!(Impact::Additive.version(), VersionClass::Minor);
        assert_eq!(Impact::Invisible.version(), VersionClass::Patch);
    }

    #[test]
    fn every_nature_has_required_context() {
        assert_eq!(Nature::all().len(), 11);
        for nature in Nature::all() {
            assert!(
                !nature.required_context().is_empty(),
                "{nature} has no context types"
            );
        }
        assert_eq!(Nature::Bug.required_context(), &["rca"]);
        assert_eq!(Nature::Security.required_context().len(), 4);
    }

    #[test]
    fn tokens_parse_back() {
        for nature in Nature::all() {
            assert_eq!(Nature::from_str(nature.as_str()).unwrap(), *nature);
        }
        for status in Status::all() {
            assert_eq!(Status::from_str(status.as_str()).unwrap(), *status);
        }
        assert_eq!(Status::from_str("in-progress").unwrap(), Status::InProgress);
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert!(Nature::from_str("Feature").is_err());
        assert!(Impact::from_str("BREAKING").is_err());
        assert!(Status::from_str("in_progress").is_err());
    }

    #[test]
    fn serde_tokens_match_as_str() {
        let yaml = serde_yaml::to_string(&Status::InProgress).unwrap();
        assert_eq!(yaml.trim(), "in-progress");
        let parsed: Nature = serde_yaml::from_str("hotfix").unwrap();
        assert_eq!(parsed, Nature::Hotfix);
    }

    #[test]
    fn status_defaults_to_draft() {
        assert_eq!(Status::default(), Status::Draft);
    }

    #[test]
    fn expected_lists_tokens_in_order() {
        assert_eq!(Impact::expected(), "breaking, additive, invisible");
    }
}
