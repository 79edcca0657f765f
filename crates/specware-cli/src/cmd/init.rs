use crate::output::print_json;
use anyhow::Context;
use specware_core::paths;
use specware_core::project;
use specware_core::settings::{self, MergeOutcome, SPECWARE_ALLOW_ENTRY};
use std::io::{BufRead, Write};
use std::path::Path;

pub const LONG_ABOUT: &str = "Initialize project to support spec-driven-workflow

This command creates the following directory structure:
  .claude/commands/     - Claude Code command files (includes /specify workflow)
  .claude/agents/       - Claude Code agent files for specialized workflows
  .spec/                - Feature specifications directory
  .spec/config.json     - Configuration for workflow question counts
  .spec/README.md       - Documentation for the spec workflow

Optional modifications (user will be prompted):
  .claude/settings.local.json - Updates project permissions to allow specware
                                commands without prompting (personal settings only)";

pub fn run(target: &Path, yes: bool, json: bool) -> anyhow::Result<()> {
    let created = project::init(target)
        .with_context(|| format!("failed to initialize project in {}", target.display()))?;
    let settings_path = paths::claude_settings_path(target);

    if json {
        // No interactive prompt in JSON mode; only -y updates settings.
        let settings = match settings::merge_allow_entry(&settings_path, SPECWARE_ALLOW_ENTRY, yes, || false) {
            Ok(outcome) => serde_json::to_value(outcome)?,
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        return print_json(&serde_json::json!({
            "target": target,
            "created": created,
            "settings": settings,
        }));
    }

    println!("Successfully initialized spec-driven workflow in {}", target.display());
    println!("\nCreated files:");
    for file in &created {
        println!("  {}", file.display());
    }

    match settings::merge_allow_entry(&settings_path, SPECWARE_ALLOW_ENTRY, yes, || {
        confirm(&settings_path)
    }) {
        Ok(outcome) => report(outcome, &settings_path),
        Err(e) => println!("Warning: Failed to update Claude Code settings: {e}"),
    }

    println!("\nNext steps:");
    println!("  1. Use 'claude' and '/specify' to begin feature specification");
    println!("  2. Optionally run 'specware localize-templates' for custom templates");
    Ok(())
}

fn confirm(settings_path: &Path) -> bool {
    println!("\nWould you like to update Claude Code project permissions to allow specware");
    println!("commands without prompting? This will add the following to your");
    println!("personal settings file ({}):", settings_path.display());
    println!("  \"allow\": [\"{SPECWARE_ALLOW_ENTRY}\"]");
    print!("\nUpdate permissions? (y/N): ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn report(outcome: MergeOutcome, settings_path: &Path) {
    let path = settings_path.display();
    match outcome {
        MergeOutcome::FileAbsent => {
            println!("\nClaude Code settings file not found at {path}");
            println!("This is normal if you haven't configured Claude Code personal settings yet.");
            println!("You can manually add permissions later if needed.");
        }
        MergeOutcome::Skipped => println!("Skipping Claude Code permissions update."),
        MergeOutcome::MalformedSkipped => {
            println!("Warning: Settings file appears to be malformed JSON. Skipping update.");
            println!("You can manually add \"{SPECWARE_ALLOW_ENTRY}\" to the allow list if needed.");
        }
        MergeOutcome::AlreadyPresent => {
            println!("Specware permissions already configured in {path}");
        }
        MergeOutcome::Updated => {
            println!("Successfully updated Claude Code permissions in {path}");
            println!("Added: \"{SPECWARE_ALLOW_ENTRY}\"");
        }
    }
}
