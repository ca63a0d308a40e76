use crate::error::{AppError, Result};

/// Schedule page URL prefix. The team abbreviation is appended.
pub const SCHEDULE_URL: &str = "https://www.espn.com/nba/team/schedule/_/name/";

/// Browser-like user agent; the source rejects obvious bot clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Bounded timeout for every schedule fetch (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub schedule_url: String,
    pub log_level: String,
    pub api_port: u16,
    /// Per-team schedule cache directory (TEAM_CACHE_DIR).
    pub team_cache_dir: String,
    /// Day-stamped aggregate cache directory (AGGREGATE_CACHE_DIR).
    pub aggregate_cache_dir: String,
    /// Where rendered chart files land (CHART_DIR).
    pub chart_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            schedule_url: std::env::var("SCHEDULE_URL")
                .unwrap_or_else(|_| SCHEDULE_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            team_cache_dir: std::env::var("TEAM_CACHE_DIR")
                .unwrap_or_else(|_| ".teams".to_string()),
            aggregate_cache_dir: std::env::var("AGGREGATE_CACHE_DIR")
                .unwrap_or_else(|_| ".aggregates".to_string()),
            chart_dir: std::env::var("CHART_DIR").unwrap_or_else(|_| ".charts".to_string()),
        })
    }
}
