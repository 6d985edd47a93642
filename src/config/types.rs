use serde::Deserialize;

/// Main configuration structure for Kattis-Historian
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where to log in and which mirrors to search for submissions
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Email/password login form
    #[serde(rename = "login-url", default = "default_login_url")]
    pub login_url: String,

    /// Problem listing, filtered to solved problems when fetched
    #[serde(rename = "problems-url", default = "default_problems_url")]
    pub problems_url: String,

    /// Base URLs of every mirror sharing the user's account
    #[serde(default = "default_mirrors")]
    pub mirrors: Vec<String>,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Request behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Extra attempts after the first failed fetch of a page
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of problems whose submission history is walked at once
    #[serde(
        rename = "max-concurrent-problems",
        default = "default_max_concurrent_problems"
    )]
    pub max_concurrent_problems: u32,

    /// Upper bound on pages walked for any one listing
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,
}

/// Score reconstruction settings
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Score every account starts with
    #[serde(default = "default_baseline")]
    pub baseline: f64,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// CSV destination; `<handle>.csv` when unset
    #[serde(rename = "csv-path")]
    pub csv_path: Option<String>,
}

fn default_login_url() -> String {
    "https://open.kattis.com/login/email".to_string()
}

fn default_problems_url() -> String {
    "https://open.kattis.com/problems".to_string()
}

fn default_mirrors() -> Vec<String> {
    vec![
        "https://open.kattis.com".to_string(),
        "https://nus.kattis.com".to_string(),
    ]
}

fn default_user_agent() -> String {
    format!("kattis-historian/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_concurrent_problems() -> u32 {
    1
}

fn default_max_pages() -> u32 {
    1000
}

fn default_baseline() -> f64 {
    crate::history::DEFAULT_BASELINE
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
            problems_url: default_problems_url(),
            mirrors: default_mirrors(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_secs: default_timeout_secs(),
            max_concurrent_problems: default_max_concurrent_problems(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
        }
    }
}
