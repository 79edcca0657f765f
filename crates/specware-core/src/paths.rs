use crate::error::NameError;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SPEC_DIR: &str = ".spec";
pub const TEMPLATES_DIR: &str = ".spec/templates";
pub const SPEC_README: &str = ".spec/README.md";
pub const WORKFLOW_CONFIG_FILE: &str = ".spec/config.json";
pub const EXAMPLE_FEATURE_DIR: &str = ".spec/000-example-spec";

pub const CLAUDE_COMMANDS_DIR: &str = ".claude/commands";
pub const CLAUDE_AGENTS_DIR: &str = ".claude/agents";
pub const CLAUDE_SETTINGS_FILE: &str = ".claude/settings.local.json";

pub const STATUS_FILE: &str = ".spec-status.json";
pub const REQUIREMENTS_MD: &str = "requirements.md";
pub const REQUIREMENTS_CONTEXT_MD: &str = "context-requirements.md";
pub const PLAN_MD: &str = "implementation-plan.md";
pub const PLAN_CONTEXT_MD: &str = "context-implementation-plan.md";

pub const MAX_FEATURE_NAME_LEN: usize = 50;

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn spec_dir(root: &Path) -> PathBuf {
    root.join(SPEC_DIR)
}

pub fn templates_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATES_DIR)
}

pub fn template_override(root: &Path, name: &str) -> PathBuf {
    templates_dir(root).join(name)
}

pub fn feature_dir(root: &Path, dir_name: &str) -> PathBuf {
    spec_dir(root).join(dir_name)
}

pub fn status_path(feature_dir: &Path) -> PathBuf {
    feature_dir.join(STATUS_FILE)
}

pub fn workflow_config_path(root: &Path) -> PathBuf {
    root.join(WORKFLOW_CONFIG_FILE)
}

pub fn claude_settings_path(root: &Path) -> PathBuf {
    root.join(CLAUDE_SETTINGS_FILE)
}

/// Path of a feature artifact relative to the project root, as reported to users.
pub fn relative_artifact(dir_name: &str, filename: &str) -> PathBuf {
    Path::new(SPEC_DIR).join(dir_name).join(filename)
}

// ---------------------------------------------------------------------------
// Feature name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"))
}

pub fn validate_feature_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if !name_re().is_match(name) {
        return Err(NameError::InvalidCharacters);
    }
    if name.len() > MAX_FEATURE_NAME_LEN {
        return Err(NameError::TooLong);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
