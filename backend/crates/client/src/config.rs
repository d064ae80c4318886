//! Client Configuration

use std::path::PathBuf;
use std::time::Duration;

/// Retry schedule for transient failures
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum retry attempts (excluding the initial request)
    pub max_retries: u32,
    /// Fixed delay per attempt; the last entry repeats if exceeded
    pub delays: Vec<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delays: vec![
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(2000),
            ],
        }
    }
}

impl RetryConfig {
    /// Delay before retry `attempt` (0-based)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let idx = (attempt as usize).min(self.delays.len().saturating_sub(1));
        self.delays.get(idx).copied().unwrap_or(Duration::ZERO)
    }

    pub fn can_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

/// API client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Timeout for normal API calls
    pub request_timeout: Duration,
    /// Tighter timeout for the token refresh call
    pub refresh_timeout: Duration,
    /// Client-side session lifetime; past it the session is treated as stale
    pub session_duration: Duration,
    /// Where the session snapshot is persisted; `None` keeps it in memory
    pub session_file: Option<PathBuf>,
    /// Retry schedule
    pub retry: RetryConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(10),
            refresh_timeout: Duration::from_secs(5),
            session_duration: Duration::from_secs(15 * 60),
            session_file: None,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}
