//! Additive merge of an allow-list entry into `.claude/settings.local.json`.
//!
//! The document belongs to another tool. It is handled as a generic JSON tree
//! so fields this module does not know about survive the rewrite, and only
//! `permissions.allow` is narrowed to a concrete type.

use crate::error::Result;
use crate::io;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Allow-entry that lets the agent run specware commands without prompting.
pub const SPECWARE_ALLOW_ENTRY: &str = "Bash(specware:*)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeOutcome {
    /// No settings document; nothing to do.
    FileAbsent,
    /// Confirmation was declined.
    Skipped,
    /// The document is not a settings object; left untouched.
    MalformedSkipped,
    AlreadyPresent,
    Updated,
}

/// Add `entry` to `permissions.allow` in the document at `path`.
///
/// Unless `auto_confirm` is set, `confirm` is called once before anything is
/// read; returning false leaves the file alone. The document is written back
/// only for `MergeOutcome::Updated`.
pub fn merge_allow_entry<F>(
    path: &Path,
    entry: &str,
    auto_confirm: bool,
    confirm: F,
) -> Result<MergeOutcome>
where
    F: FnOnce() -> bool,
{
    if !path.exists() {
        tracing::debug!(path = %path.display(), "settings file not found");
        return Ok(MergeOutcome::FileAbsent);
    }

    if !auto_confirm && !confirm() {
        return Ok(MergeOutcome::Skipped);
    }

    let data = std::fs::read(path)?;
    let Some(mut doc) = parse_settings(&data) else {
        tracing::warn!(path = %path.display(), "settings file is malformed, skipping update");
        return Ok(MergeOutcome::MalformedSkipped);
    };

    let outcome = add_allow_entry(&mut doc, entry);
    if outcome == MergeOutcome::Updated {
        let out = serde_json::to_string_pretty(&Value::Object(doc))?;
        io::replace_file(path, out.as_bytes())?;
        tracing::info!(path = %path.display(), entry, "added allow entry");
    }
    Ok(outcome)
}

/// Parse and shape-check the document. `None` when it is not JSON, or when
/// the top level, `permissions`, or `permissions.allow` has the wrong type.
fn parse_settings(data: &[u8]) -> Option<Map<String, Value>> {
    let Ok(Value::Object(doc)) = serde_json::from_slice::<Value>(data) else {
        return None;
    };
    match doc.get("permissions") {
        None | Some(Value::Null) => {}
        Some(Value::Object(perms)) => match perms.get("allow") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => {}
            Some(_) => return None,
        },
        Some(_) => return None,
    }
    Some(doc)
}

fn add_allow_entry(doc: &mut Map<String, Value>, entry: &str) -> MergeOutcome {
    let perms = doc.entry("permissions").or_insert(Value::Null);
    if perms.is_null() {
        *perms = Value::Object(Map::new());
    }
    let Value::Object(perms) = perms else {
        return MergeOutcome::MalformedSkipped;
    };

    let allow = perms.entry("allow").or_insert(Value::Null);
    if allow.is_null() {
        *allow = Value::Array(Vec::new());
    }
    let Value::Array(allow) = allow else {
        return MergeOutcome::MalformedSkipped;
    };

    if allow.iter().any(|v| v.as_str() == Some(entry)) {
        return MergeOutcome::AlreadyPresent;
    }
    allow.push(Value::String(entry.to_string()));
    MergeOutcome::Updated
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
