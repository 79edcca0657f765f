use std::path::PathBuf;
use thiserror::Error;

/// Reasons a feature short name is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("feature name cannot be empty")]
    Empty,

    #[error("feature name can only contain letters, numbers, hyphens, and underscores")]
    InvalidCharacters,

    #[error("feature name must be 50 characters or less")]
    TooLong,
}

#[derive(Debug, Error)]
pub enum SpecError {
    #[error(".spec directory not found: run 'specware init' first")]
    NotInitialized,

    #[error(transparent)]
    InvalidName(#[from] NameError),

    #[error(
        "feature directory not found for {0}: run 'specware feature new-requirements {0}' first"
    )]
    FeatureNotFound(String),

    #[error("implementation plan already exists for feature {0}")]
    PlanExists(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("status record not found in {}", .0.display())]
    StatusNotFound(PathBuf),

    #[error("feature creation stopped partway (already written: {})", display_paths(.created))]
    Partial {
        created: Vec<PathBuf>,
        #[source]
        source: Box<SpecError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SpecError {
    /// Paths already written when a multi-step creation stopped early.
    pub fn created(&self) -> &[PathBuf] {
        match self {
            SpecError::Partial { created, .. } => created,
            _ => &[],
        }
    }

    /// The underlying failure, looking through a `Partial` wrapper.
    pub fn root_cause(&self) -> &SpecError {
        match self {
            SpecError::Partial { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SpecError>;
