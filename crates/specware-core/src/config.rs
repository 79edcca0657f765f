use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// StageQuestions
// ---------------------------------------------------------------------------

/// How many questions the agent asks in each round of a workflow stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageQuestions {
    #[serde(default = "default_question_count")]
    pub context_questions: u32,
    #[serde(default = "default_question_count")]
    pub expert_questions: u32,
}

fn default_question_count() -> u32 {
    5
}

impl Default for StageQuestions {
    fn default() -> Self {
        Self {
            context_questions: default_question_count(),
            expert_questions: default_question_count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Workflow settings stored in `.spec/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub requirements: StageQuestions,
    #[serde(default)]
    pub implementation_plan: StageQuestions,
}

impl Config {
    /// Load `.spec/config.json`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::workflow_config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&data)?;
        Ok(config)
    }
}
