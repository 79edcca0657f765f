mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, feature::FeatureSubcommand, jira::JiraSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specware",
    about = "Spec-driven workflow enablement tool",
    long_about = "A tool to facilitate spec-driven development workflows through the Claude Code AI coding assistant.",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .spec/ or .git/)
    #[arg(long, global = true, env = "SPECWARE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize project to support spec-driven-workflow
    #[command(long_about = cmd::init::LONG_ABOUT)]
    Init {
        /// Directory to initialize (default: the project root)
        directory: Option<PathBuf>,

        /// Automatically answer yes to all prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Create project-specific templates
    #[command(long_about = cmd::localize::LONG_ABOUT)]
    LocalizeTemplates,

    /// Feature specification commands
    Feature {
        #[command(subcommand)]
        subcommand: FeatureSubcommand,
    },

    /// Inspect the workflow configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Jira integration commands
    Jira {
        #[command(subcommand)]
        subcommand: JiraSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { directory, yes } => {
            let target = directory.unwrap_or_else(|| root.clone());
            cmd::init::run(&target, yes, cli.json)
        }
        Commands::LocalizeTemplates => cmd::localize::run(&root, cli.json),
        Commands::Feature { subcommand } => cmd::feature::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Jira { subcommand } => cmd::jira::run(subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
