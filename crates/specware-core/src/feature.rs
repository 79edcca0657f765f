use crate::error::{Result, SpecError};
use crate::io;
use crate::paths;
use crate::status::{self, FeatureStatus};
use crate::template;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// FeatureId
// ---------------------------------------------------------------------------

/// Composite identifier of a feature directory: `NNN-short-name`.
///
/// The number is zero-padded to three digits. Wider numbers are written
/// as-is, so parsing accepts any run of three or more digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FeatureId {
    pub number: u32,
    pub short_name: String,
}

impl FeatureId {
    pub fn new(number: u32, short_name: impl Into<String>) -> Self {
        Self {
            number,
            short_name: short_name.into(),
        }
    }

    pub fn dir_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}-{}", self.number, self.short_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAFeatureDir;

impl FromStr for FeatureId {
    type Err = NotAFeatureDir;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let digits = s.bytes().take_while(u8::is_ascii_digit).count();
        if digits < 3 {
            return Err(NotAFeatureDir);
        }
        let (num, rest) = s.split_at(digits);
        let short_name = rest.strip_prefix('-').ok_or(NotAFeatureDir)?;
        if short_name.is_empty() {
            return Err(NotAFeatureDir);
        }
        let number = num.parse().map_err(|_| NotAFeatureDir)?;
        Ok(Self::new(number, short_name))
    }
}

/// A feature directory found on disk.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureDir {
    pub id: FeatureId,
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

pub fn require_initialized(root: &Path) -> Result<()> {
    if !paths::spec_dir(root).is_dir() {
        return Err(SpecError::NotInitialized);
    }
    Ok(())
}

/// Feature directories directly under `spec_root`, sorted by number.
/// Entries that do not look like `NNN-name`, or that cannot be inspected,
/// are skipped. Only a failure to open `spec_root` itself is an error.
fn scan(spec_root: &Path) -> std::io::Result<Vec<FeatureDir>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(spec_root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(root = %spec_root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!(entry = %entry.path().display(), error = %e, "skipping entry");
                continue;
            }
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Ok(id) = name.parse::<FeatureId>() {
            dirs.push(FeatureDir {
                id,
                path: entry.path(),
            });
        }
    }
    dirs.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(dirs)
}

/// Next unused sequence number under `spec_root`: one past the highest
/// existing number. A missing or unreadable root counts as empty. A
/// directory already at `u32::MAX` has no successor and is ignored.
///
/// Two processes allocating at the same time can get the same number; no
/// lock is taken.
pub fn next_number(spec_root: &Path) -> u32 {
    let dirs = match scan(spec_root) {
        Ok(dirs) => dirs,
        Err(e) => {
            tracing::debug!(root = %spec_root.display(), error = %e, "spec root not listable");
            return 1;
        }
    };
    dirs.iter()
        .filter_map(|d| {
            let next = d.id.number.checked_add(1);
            if next.is_none() {
                tracing::warn!(feature = %d.id, "sequence number cannot be advanced, ignoring");
            }
            next
        })
        .max()
        .unwrap_or(1)
}

/// Find the feature whose directory name ends in `-<short_name>`.
/// With several matches, the lowest number wins.
pub fn find(root: &Path, short_name: &str) -> Result<FeatureDir> {
    scan(&paths::spec_dir(root))?
        .into_iter()
        .find(|d| d.id.short_name == short_name)
        .ok_or_else(|| SpecError::FeatureNotFound(short_name.to_string()))
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureSummary {
    pub id: String,
    pub number: u32,
    pub short_name: String,
    pub current_step: Option<String>,
    pub has_plan: bool,
}

pub fn list(root: &Path) -> Result<Vec<FeatureSummary>> {
    require_initialized(root)?;
    let summaries = scan(&paths::spec_dir(root))?
        .into_iter()
        .map(|d| {
            let current_step = FeatureStatus::load(&d.path).ok().map(|s| s.current_step);
            FeatureSummary {
                id: d.id.to_string(),
                number: d.id.number,
                short_name: d.id.short_name.clone(),
                current_step,
                has_plan: d.path.join(paths::PLAN_MD).exists(),
            }
        })
        .collect();
    Ok(summaries)
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Records each written artifact so a failure partway can report what exists.
struct Written {
    dir_name: String,
    created: Vec<PathBuf>,
}

impl Written {
    fn new(dir_name: String) -> Self {
        Self {
            dir_name,
            created: Vec::new(),
        }
    }

    fn step<T>(&self, r: Result<T>) -> Result<T> {
        r.map_err(|e| {
            if self.created.is_empty() {
                e
            } else {
                SpecError::Partial {
                    created: self.created.clone(),
                    source: Box::new(e),
                }
            }
        })
    }

    fn write(&mut self, dir: &Path, filename: &str, data: &[u8]) -> Result<()> {
        self.step(io::replace_file(&dir.join(filename), data))?;
        self.record(filename);
        Ok(())
    }

    fn record(&mut self, filename: &str) {
        self.created
            .push(paths::relative_artifact(&self.dir_name, filename));
    }
}

/// Create `NNN-<short_name>` with its requirements document, requirements
/// context document, and a status record at `requirements-gathering`.
///
/// Returns the written paths relative to `root`, in write order. Not
/// transactional: on a failure after the first write the error is
/// `SpecError::Partial` and the written files stay on disk.
pub fn create_requirements(root: &Path, short_name: &str) -> Result<Vec<PathBuf>> {
    paths::validate_feature_name(short_name)?;
    require_initialized(root)?;

    let id = FeatureId::new(next_number(&paths::spec_dir(root)), short_name);
    let dir_name = id.dir_name();
    let dir = paths::feature_dir(root, &dir_name);
    std::fs::create_dir_all(&dir)?;
    tracing::info!(feature = %id, "created feature directory");

    let mut out = Written::new(dir_name);

    let requirements = out.step(template::resolve(root, template::REQUIREMENTS_TEMPLATE))?;
    out.write(&dir, paths::REQUIREMENTS_MD, &requirements.content)?;

    let context = out.step(template::resolve(root, template::CONTEXT_TEMPLATE))?;
    let context = context.with_title("Requirements");
    out.write(&dir, paths::REQUIREMENTS_CONTEXT_MD, &context)?;

    out.step(FeatureStatus::new(status::REQUIREMENTS_GATHERING).save(&dir))?;
    out.record(paths::STATUS_FILE);

    Ok(out.created)
}

/// Add an implementation plan and its context document to an existing
/// feature. Fails with `PlanExists` if the plan is already there; the status
/// record is left alone.
pub fn create_implementation_plan(root: &Path, short_name: &str) -> Result<Vec<PathBuf>> {
    paths::validate_feature_name(short_name)?;
    require_initialized(root)?;

    let feature = find(root, short_name)?;
    if feature.path.join(paths::PLAN_MD).exists() {
        return Err(SpecError::PlanExists(short_name.to_string()));
    }

    let mut out = Written::new(feature.id.dir_name());

    let plan = template::resolve(root, template::PLAN_TEMPLATE)?;
    out.write(&feature.path, paths::PLAN_MD, &plan.content)?;

    let context = out.step(template::resolve(root, template::CONTEXT_TEMPLATE))?;
    let context = context.with_title("Implementation Plan");
    out.write(&feature.path, paths::PLAN_CONTEXT_MD, &context)?;

    tracing::info!(feature = %feature.id, "created implementation plan");
    Ok(out.created)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
