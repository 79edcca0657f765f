use crate::output::print_json;
use anyhow::Context;
use specware_core::template;
use std::path::Path;

pub const LONG_ABOUT: &str = "Copies embedded templates to .spec/templates/ directory for project-specific customization.

This allows you to modify templates locally for your project without affecting the embedded defaults.";

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let written = template::localize(root).context("failed to localize templates")?;

    if json {
        return print_json(&written);
    }

    for t in written.iter().filter(|t| t.overwritten) {
        println!("Warning: Template file {} already exists, overwriting", t.path.display());
    }
    println!("Templates localized to .spec/templates/");
    Ok(())
}
