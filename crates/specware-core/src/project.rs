use crate::assets;
use crate::error::{Result, SpecError};
use crate::io;
use crate::paths;
use crate::status::{self, FeatureStatus};
use std::path::{Path, PathBuf};

/// Set up `target` for the spec-driven workflow.
///
/// Writes the agent command and agent files under `.claude/`, the `.spec/`
/// README and workflow config, and an example feature at `Not Started`.
/// Managed files are overwritten on re-run. Returns the written paths
/// relative to `target`.
pub fn init(target: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    for dir in [paths::CLAUDE_COMMANDS_DIR, paths::CLAUDE_AGENTS_DIR, paths::SPEC_DIR] {
        io::ensure_dir(&target.join(dir))?;
    }

    copy_bundled_dir(target, assets::COMMANDS, paths::CLAUDE_COMMANDS_DIR, &mut created)?;
    copy_bundled_dir(target, assets::AGENTS, paths::CLAUDE_AGENTS_DIR, &mut created)?;

    let readme = assets::get(assets::SPEC_README)
        .ok_or_else(|| SpecError::TemplateNotFound(assets::SPEC_README.to_string()))?;
    io::atomic_write(&target.join(paths::SPEC_README), &readme)?;
    created.push(PathBuf::from(paths::SPEC_README));

    copy_bundled_dir(target, assets::CONFIG, paths::SPEC_DIR, &mut created)?;

    let example = target.join(paths::EXAMPLE_FEATURE_DIR);
    io::ensure_dir(&example)?;
    FeatureStatus::new(status::NOT_STARTED).save(&example)?;
    created.push(Path::new(paths::EXAMPLE_FEATURE_DIR).join(paths::STATUS_FILE));

    tracing::info!(target = %target.display(), files = created.len(), "initialized project");
    Ok(created)
}

fn copy_bundled_dir(
    target: &Path,
    bundle_dir: &str,
    dest: &str,
    created: &mut Vec<PathBuf>,
) -> Result<()> {
    for name in assets::list(bundle_dir) {
        let data = assets::get_in(bundle_dir, &name)
            .ok_or_else(|| SpecError::TemplateNotFound(format!("{bundle_dir}/{name}")))?;
        let rel = Path::new(dest).join(&name);
        io::atomic_write(&target.join(&rel), &data)?;
        created.push(rel);
    }
    Ok(())
}
