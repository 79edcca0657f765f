//! Bundled default content, embedded into the binary at compile time.
//!
//! Keys are paths relative to the `assets/` folder, always `/`-separated:
//! `templates/requirements.md`, `commands/specify.md`, `spec-readme.md`, ...

use rust_embed::Embed;
use std::borrow::Cow;

#[derive(Embed)]
#[folder = "assets/"]
struct Bundled;

pub const TEMPLATES: &str = "templates";
pub const COMMANDS: &str = "commands";
pub const AGENTS: &str = "agents";
pub const CONFIG: &str = "config";
pub const SPEC_README: &str = "spec-readme.md";

/// Look up a bundled file by its key path.
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    <Bundled as Embed>::get(path).map(|f| f.data)
}

/// Look up `<dir>/<name>`.
pub fn get_in(dir: &str, name: &str) -> Option<Cow<'static, [u8]>> {
    get(&format!("{dir}/{name}"))
}

/// Names of every bundled file directly or transitively under `dir`,
/// relative to `dir`, sorted.
pub fn list(dir: &str) -> Vec<String> {
    let prefix = format!("{dir}/");
    let mut names: Vec<String> = <Bundled as Embed>::iter()
        .filter_map(|p| p.strip_prefix(&prefix).map(str::to_string))
        .collect();
    names.sort();
    names
}
