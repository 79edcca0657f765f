use crate::error::{Result, SpecError};
use crate::feature;
use crate::io;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Workflow phase vocabulary
//
// Convention shared with the agent command files. Nothing here enforces an
// order; any string may follow any other.
// ---------------------------------------------------------------------------

pub const NOT_STARTED: &str = "Not Started";
pub const REQUIREMENTS_GATHERING: &str = "requirements-gathering";
pub const REQUIREMENTS_CONTEXT: &str = "requirements-context";
pub const REQUIREMENTS_QA: &str = "requirements-qa";
pub const REQUIREMENTS_REVIEW: &str = "requirements-review";
pub const REQUIREMENTS_COMPLETE: &str = "requirements-complete";
pub const IMPLEMENTATION_PLANNING: &str = "implementation-planning";
pub const PLAN_QA: &str = "plan-qa";
pub const PLAN_REVIEW: &str = "plan-review";
pub const PLAN_COMPLETE: &str = "plan-complete";

pub fn known_phases() -> &'static [&'static str] {
    &[
        NOT_STARTED,
        REQUIREMENTS_GATHERING,
        REQUIREMENTS_CONTEXT,
        REQUIREMENTS_QA,
        REQUIREMENTS_REVIEW,
        REQUIREMENTS_COMPLETE,
        IMPLEMENTATION_PLANNING,
        PLAN_QA,
        PLAN_REVIEW,
        PLAN_COMPLETE,
    ]
}

// ---------------------------------------------------------------------------
// FeatureStatus
// ---------------------------------------------------------------------------

/// Contents of `.spec-status.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureStatus {
    #[serde(rename = "current-step")]
    pub current_step: String,
}

impl FeatureStatus {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            current_step: step.into(),
        }
    }

    pub fn load(feature_dir: &Path) -> Result<Self> {
        let path = paths::status_path(feature_dir);
        if !path.exists() {
            return Err(SpecError::StatusNotFound(feature_dir.to_path_buf()));
        }
        let data = std::fs::read_to_string(&path)?;
        let status: FeatureStatus = serde_json::from_str(&data)?;
        Ok(status)
    }

    /// Replace the whole record. The feature directory must already exist.
    pub fn save(&self, feature_dir: &Path) -> Result<()> {
        if !feature_dir.is_dir() {
            return Err(SpecError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("feature directory {} does not exist", feature_dir.display()),
            )));
        }
        let data = serde_json::to_string_pretty(self)?;
        io::replace_file(&paths::status_path(feature_dir), data.as_bytes())
    }
}

/// Set the current step of the feature named `short_name`.
///
/// Creates the record if it was deleted. Returns the feature directory.
pub fn update(root: &Path, short_name: &str, step: &str) -> Result<PathBuf> {
    paths::validate_feature_name(short_name)?;
    feature::require_initialized(root)?;

    let dir = feature::find(root, short_name)?;
    FeatureStatus::new(step).save(&dir.path)?;
    tracing::info!(feature = %dir.id, step, "updated feature status");
    Ok(dir.path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
