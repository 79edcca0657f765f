use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use specware_core::{feature, status};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum FeatureSubcommand {
    /// Create new feature specification directory
    ///
    /// Creates XXX-<short-name> under .spec/, where XXX is the next sequence
    /// number starting from 001, containing requirements.md and
    /// context-requirements.md.
    NewRequirements { short_name: String },

    /// Create implementation plan for existing feature
    ///
    /// The feature directory must already exist (created with
    /// new-requirements). Adds implementation-plan.md and
    /// context-implementation-plan.md.
    NewImplementationPlan { short_name: String },

    /// Update the status of a feature specification
    ///
    /// Any string is accepted. The /specify command uses: requirements-gathering,
    /// requirements-context, requirements-qa, requirements-review,
    /// requirements-complete, implementation-planning, plan-qa, plan-review,
    /// plan-complete.
    UpdateState { short_name: String, status: String },

    /// List feature specifications and their current step
    List,
}

pub fn run(root: &Path, subcmd: FeatureSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        FeatureSubcommand::NewRequirements { short_name } => {
            new_requirements(root, &short_name, json)
        }
        FeatureSubcommand::NewImplementationPlan { short_name } => {
            new_implementation_plan(root, &short_name, json)
        }
        FeatureSubcommand::UpdateState { short_name, status } => {
            update_state(root, &short_name, &status, json)
        }
        FeatureSubcommand::List => list(root, json),
    }
}

fn print_created(heading: &str, short_name: &str, created: &[PathBuf], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "short_name": short_name,
            "created": created,
        }));
    }
    println!("{heading}");
    println!("\nCreated files:");
    for file in created {
        println!("  {}", file.display());
    }
    Ok(())
}

fn new_requirements(root: &Path, short_name: &str, json: bool) -> anyhow::Result<()> {
    let created = feature::create_requirements(root, short_name)
        .with_context(|| format!("failed to create feature requirements for '{short_name}'"))?;
    print_created(
        &format!("Created feature requirements for '{short_name}'"),
        short_name,
        &created,
        json,
    )
}

fn new_implementation_plan(root: &Path, short_name: &str, json: bool) -> anyhow::Result<()> {
    let created = feature::create_implementation_plan(root, short_name)
        .with_context(|| format!("failed to create implementation plan for '{short_name}'"))?;
    print_created(
        &format!("Created implementation plan for feature '{short_name}'"),
        short_name,
        &created,
        json,
    )
}

fn update_state(root: &Path, short_name: &str, step: &str, json: bool) -> anyhow::Result<()> {
    if !status::known_phases().contains(&step) {
        tracing::info!(step, "status is not one of the standard workflow phases");
    }
    let dir = status::update(root, short_name, step)
        .with_context(|| format!("failed to update status for '{short_name}'"))?;

    if json {
        return print_json(&serde_json::json!({
            "short_name": short_name,
            "current_step": step,
            "path": dir,
        }));
    }
    println!("Updated status for feature '{short_name}' to '{step}'");
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let features = feature::list(root).context("failed to list features")?;

    if json {
        return print_json(&features);
    }

    if features.is_empty() {
        println!("No features yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = features
        .iter()
        .map(|f| {
            vec![
                f.id.clone(),
                f.current_step.clone().unwrap_or_else(|| "-".to_string()),
                if f.has_plan { "yes".to_string() } else { String::new() },
            ]
        })
        .collect();
    print_table(&["FEATURE", "STEP", "PLAN"], rows);
    Ok(())
}
