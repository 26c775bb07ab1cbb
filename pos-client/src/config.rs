//! Client configuration

use std::time::Duration;

/// Default occupancy poll interval (table overview)
pub const DEFAULT_OCCUPANCY_INTERVAL: Duration = Duration::from_millis(1000);
/// Default liveness poll interval (bar view)
pub const DEFAULT_LIVENESS_INTERVAL: Duration = Duration::from_millis(3000);

/// Client configuration for talking to the POS server
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | POS_SERVER_URL | http://localhost:5000 | Server base URL |
/// | POS_TOKEN | - | Bearer token |
/// | POS_REQUEST_TIMEOUT_SECS | 5 | Per-request timeout |
/// | POS_OCCUPANCY_INTERVAL_MS | 1000 | Occupancy poll interval |
/// | POS_LIVENESS_INTERVAL_MS | 3000 | Liveness poll interval |
/// | POS_BAR_NAME | - | Bar whose feed is watched (liveness off if unset) |
/// | POS_LAYOUT_FILE | layout.json | Table layout JSON |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Bearer token, if the server requires one
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    pub occupancy_interval: Duration,

    pub liveness_interval: Duration,

    /// Bar feed polled for liveness
    pub bar_name: Option<String>,

    /// Path of the table layout JSON
    pub layout_file: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 5,
            occupancy_interval: DEFAULT_OCCUPANCY_INTERVAL,
            liveness_interval: DEFAULT_LIVENESS_INTERVAL,
            bar_name: None,
            layout_file: "layout.json".into(),
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("POS_SERVER_URL").unwrap_or_else(|_| "http://localhost:5000".into()),
        );
        config.token = std::env::var("POS_TOKEN").ok();
        if let Some(timeout) = env_parse("POS_REQUEST_TIMEOUT_SECS") {
            config.timeout = timeout;
        }
        if let Some(ms) = env_parse("POS_OCCUPANCY_INTERVAL_MS") {
            config.occupancy_interval = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse("POS_LIVENESS_INTERVAL_MS") {
            config.liveness_interval = Duration::from_millis(ms);
        }
        config.bar_name = std::env::var("POS_BAR_NAME").ok().filter(|s| !s.is_empty());
        if let Ok(path) = std::env::var("POS_LAYOUT_FILE") {
            config.layout_file = path;
        }
        config
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_occupancy_interval(mut self, interval: Duration) -> Self {
        self.occupancy_interval = interval;
        self
    }

    pub fn with_liveness_interval(mut self, interval: Duration) -> Self {
        self.liveness_interval = interval;
        self
    }

    pub fn with_bar_name(mut self, bar: impl Into<String>) -> Self {
        self.bar_name = Some(bar.into());
        self
    }

    pub fn with_layout_file(mut self, path: impl Into<String>) -> Self {
        self.layout_file = path.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.occupancy_interval, Duration::from_secs(1));
        assert_eq!(config.liveness_interval, Duration::from_secs(3));
        assert!(config.bar_name.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://pos.local")
            .with_token("t")
            .with_timeout(2)
            .with_occupancy_interval(Duration::from_millis(1500))
            .with_bar_name("Drinks")
            .with_layout_file("/etc/pos/layout.json");
        assert_eq!(config.token.as_deref(), Some("t"));
        assert_eq!(config.timeout, 2);
        assert_eq!(config.occupancy_interval, Duration::from_millis(1500));
        assert_eq!(config.bar_name.as_deref(), Some("Drinks"));
        assert_eq!(config.layout_file, "/etc/pos/layout.json");
    }
}
