use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for an import run, resolved from `KITBAG_*` env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Local supplier export read by `import` when no URL is configured.
    pub feed_path: PathBuf,
    /// Remote supplier export; takes precedence over `feed_path` when set.
    pub feed_url: Option<String>,
    /// Base URL of the backend product API used by `sync`.
    pub api_url: String,
    pub output_path: PathBuf,
    /// Optional YAML override for the built-in rule tables.
    pub rules_path: Option<PathBuf>,
    /// First catalog id handed out.
    pub start_id: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}
