use crate::assets;
use crate::error::{Result, SpecError};
use crate::io;
use crate::paths;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const REQUIREMENTS_TEMPLATE: &str = "requirements.md";
pub const PLAN_TEMPLATE: &str = "implementation-plan.md";
pub const CONTEXT_TEMPLATE: &str = "context.md";

/// Placeholder in the context template replaced with the document title.
pub const TITLE_PLACEHOLDER: &str = "[Feature Name]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Override,
    Bundled,
}

#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    pub name: String,
    pub content: Vec<u8>,
    pub origin: Origin,
}

impl ResolvedTemplate {
    /// Render as a context document: the first title placeholder becomes
    /// `title`. All other bytes are copied unchanged, UTF-8 or not.
    pub fn with_title(&self, title: &str) -> Vec<u8> {
        let needle = TITLE_PLACEHOLDER.as_bytes();
        let Some(at) = self
            .content
            .windows(needle.len())
            .position(|w| w == needle)
        else {
            return self.content.clone();
        };
        let mut out = Vec::with_capacity(self.content.len() + title.len());
        out.extend_from_slice(&self.content[..at]);
        out.extend_from_slice(title.as_bytes());
        out.extend_from_slice(&self.content[at + needle.len()..]);
        out
    }
}

/// Resolve a template, preferring `<root>/.spec/templates/<name>` over the
/// bundled copy. The two sources are never merged.
pub fn resolve(root: &Path, name: &str) -> Result<ResolvedTemplate> {
    let local = paths::template_override(root, name);
    if let Ok(content) = std::fs::read(&local) {
        tracing::debug!(template = name, path = %local.display(), "using project template");
        return Ok(ResolvedTemplate {
            name: name.to_string(),
            content,
            origin: Origin::Override,
        });
    }

    let data = assets::get_in(assets::TEMPLATES, name)
        .ok_or_else(|| SpecError::TemplateNotFound(name.to_string()))?;
    tracing::debug!(template = name, "using bundled template");
    Ok(ResolvedTemplate {
        name: name.to_string(),
        content: data.into_owned(),
        origin: Origin::Bundled,
    })
}

// ---------------------------------------------------------------------------
// Localization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedTemplate {
    /// Path relative to the project root.
    pub path: PathBuf,
    /// True when an existing project template was replaced.
    pub overwritten: bool,
}

/// Copy every bundled template into `<root>/.spec/templates/`.
///
/// Existing files are overwritten and flagged `overwritten` in the result;
/// a customized template is lost on re-run.
pub fn localize(root: &Path) -> Result<Vec<LocalizedTemplate>> {
    let dir = paths::templates_dir(root);
    io::ensure_dir(&dir).map_err(|e| match e {
        SpecError::Io(err) => SpecError::Io(std::io::Error::new(
            err.kind(),
            format!("failed to create templates directory {}: {err}", dir.display()),
        )),
        other => other,
    })?;

    let mut written = Vec::new();
    for name in assets::list(assets::TEMPLATES) {
        let data = assets::get_in(assets::TEMPLATES, &name)
            .ok_or_else(|| SpecError::TemplateNotFound(name.clone()))?;
        let target = dir.join(&name);
        let overwritten = target.exists();
        if overwritten {
            tracing::info!(template = %name, "template file already exists, overwriting");
        }
        io::atomic_write(&target, &data)?;
        written.push(LocalizedTemplate {
            path: Path::new(paths::TEMPLATES_DIR).join(&name),
            overwritten,
        });
    }
    Ok(written)
}
