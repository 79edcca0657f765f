use super::{Issue, JiraError, Result};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const URL_VAR: &str = "JIRA_URL";
const TOKEN_VAR: &str = "JIRA_API_TOKEN";

// ---------------------------------------------------------------------------
// Issue keys
// ---------------------------------------------------------------------------

static KEY_RE: OnceLock<Regex> = OnceLock::new();

fn key_re() -> &'static Regex {
    KEY_RE.get_or_init(|| Regex::new(r"^[A-Za-z]+-[0-9]+$").expect("valid regex"))
}

pub fn validate_issue_key(key: &str) -> Result<()> {
    if !key_re().is_match(key) {
        return Err(JiraError::InvalidKey(key.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JiraConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub api_token: String,
}

impl JiraConfig {
    /// Read `JIRA_URL` and `JIRA_API_TOKEN` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(JiraError::MissingEnv(name))
        };
        let base_url = non_empty(URL_VAR)?;
        let api_token = non_empty(TOKEN_VAR)?;
        reqwest::Url::parse(&base_url).map_err(|e| JiraError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            base_url,
            api_token,
        })
    }
}

// ---------------------------------------------------------------------------
// JiraClient
// ---------------------------------------------------------------------------

pub struct JiraClient {
    config: JiraConfig,
    timeout: Duration,
    http: Client,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(config: JiraConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(JiraError::Network)?;
        Ok(Self {
            config,
            timeout,
            http,
        })
    }

    fn issue_url(&self, key: &str) -> String {
        format!(
            "{}/rest/api/2/issue/{key}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Fetch one issue. The key is validated before any request is made.
    pub fn get_issue(&self, key: &str) -> Result<Issue> {
        validate_issue_key(key)?;

        let url = self.issue_url(key);
        tracing::debug!(%url, "fetching issue");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .map_err(|e| self.transport_error(e))?;

        match resp.status() {
            StatusCode::OK => {
                let body = resp.text().map_err(|e| self.transport_error(e))?;
                serde_json::from_str(&body).map_err(JiraError::Parse)
            }
            StatusCode::UNAUTHORIZED => Err(JiraError::Authentication),
            StatusCode::FORBIDDEN => Err(JiraError::PermissionDenied(key.to_string())),
            StatusCode::NOT_FOUND => Err(JiraError::NotFound(key.to_string())),
            StatusCode::INTERNAL_SERVER_ERROR => Err(JiraError::Server),
            other => Err(JiraError::UnexpectedStatus(other.as_u16())),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> JiraError {
        if e.is_timeout() {
            JiraError::Timeout(self.timeout)
        } else {
            JiraError::Network(e)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
