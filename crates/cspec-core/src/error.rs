use thiserror::Error;

#[derive(Debug, Error)]
pub enum CspecError {
    #[error("not initialized: run 'cspec init'")]
    NotInitialized,

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("spec not found: {0}")]
    SpecNotFound(String),

    #[error("work item not found: {0}")]
    WorkItemNotFound(String),

    #[error("template is missing the '{0}' marker")]
    MissingMarker(String),

    #[error("invalid value '{value}' for {kind}")]
    InvalidEnum { kind: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CspecError>;
