use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use specware_core::config::{Config, StageQuestions};
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the workflow question counts from .spec/config.json
    Show,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load .spec/config.json")?;

    if json {
        return print_json(&config);
    }

    print_stage("Requirements", &config.requirements);
    print_stage("Implementation plan", &config.implementation_plan);
    Ok(())
}

fn print_stage(label: &str, q: &StageQuestions) {
    println!("{label}:");
    println!("  context questions: {}", q.context_questions);
    println!("  expert questions:  {}", q.expert_questions);
}
