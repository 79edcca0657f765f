use crate::output::print_json;
use clap::Subcommand;
use specware_core::jira::{format_issue, JiraClient, JiraConfig};

#[derive(Subcommand)]
pub enum JiraSubcommand {
    /// Fetch a single Jira issue
    #[command(long_about = GET_ISSUE_ABOUT)]
    GetIssue {
        /// Issue key, e.g. PROJ-123
        issue_key: String,
    },
}

const GET_ISSUE_ABOUT: &str = "Fetch and display a single Jira issue by its key.

Requires environment variables:
- JIRA_URL: The base URL of your Jira instance (e.g., https://company.atlassian.net)
- JIRA_API_TOKEN: Your personal access token with issue read permissions

Example:
  specware jira get-issue PROJ-123";

pub fn run(subcmd: JiraSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        JiraSubcommand::GetIssue { issue_key } => get_issue(&issue_key, json),
    }
}

fn get_issue(key: &str, json: bool) -> anyhow::Result<()> {
    let config = JiraConfig::from_env()?;
    let client = JiraClient::new(config)?;
    let issue = client.get_issue(key)?;

    if json {
        return print_json(&issue);
    }
    println!("{}", format_issue(&issue));
    Ok(())
}
