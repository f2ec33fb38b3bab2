//! Scraper configuration
//!
//! All tunables live in [`ScraperConfig`]: the direct-retrieval timeout and
//! user agent, the render settling delay and browser flags, the exclusion
//! lists and the fetch policy. Every section is optional in the JSON file
//! and falls back to the defaults below.

use crate::error::ConfigError;
use crate::fetch::FetchPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub use crate::extraction::ExclusionRules;

/// User agent sent by the direct fetcher unless overridden
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Settings for direct HTTP retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (default: 10000)
    pub timeout_ms: u64,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Settings for rendered retrieval through a headless browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Run without a window (default: true)
    pub headless: bool,
    /// Keep the Chromium sandbox enabled (default: false)
    pub sandbox: bool,
    /// Delay after navigation before the document is read, in ms (default: 3000)
    pub settle_ms: u64,
    /// Upper bound on navigation, in ms (default: 30000)
    pub navigation_timeout_ms: u64,
    /// Path to Chrome/Chromium executable (None = auto-detect)
    pub chrome_path: Option<String>,
    /// User agent override for the rendered page
    pub user_agent: Option<String>,
    /// Additional Chrome arguments
    pub extra_args: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            headless: true,
            sandbox: false,
            settle_ms: 3_000,
            navigation_timeout_ms: 30_000,
            chrome_path: None,
            user_agent: None,
            extra_args: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// Create a new config builder
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }
}

/// Builder for RenderConfig
#[derive(Default)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    /// Set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Enable/disable sandbox
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Set the settling delay
    pub fn settle_ms(mut self, ms: u64) -> Self {
        self.config.settle_ms = ms;
        self
    }

    /// Set the navigation bound
    pub fn navigation_timeout_ms(mut self, ms: u64) -> Self {
        self.config.navigation_timeout_ms = ms;
        self
    }

    /// Set Chrome path
    pub fn chrome_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    /// Add extra Chrome argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.config.extra_args.push(arg.into());
        self
    }

    /// Build the config
    pub fn build(self) -> RenderConfig {
        self.config
    }
}

/// Complete scraper configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Direct retrieval settings
    pub http: HttpConfig,
    /// Rendered retrieval settings
    pub render: RenderConfig,
    /// Candidate exclusion lists
    pub exclusions: ExclusionRules,
    /// Which retrieval strategies to use per target
    pub policy: FetchPolicy,
}

impl ScraperConfig {
    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: shown.clone(),
            source,
        })?;
        debug!("Loaded config from {}", shown);
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scraper cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.render.navigation_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "render.navigation_timeout_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        self.policy.compile()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.http.timeout_ms, 10_000);
        assert_eq!(config.http.user_agent, DEFAULT_USER_AGENT);
        assert!(config.render.headless);
        assert!(!config.render.sandbox);
        assert_eq!(config.render.settle_ms, 3_000);
        assert_eq!(config.policy, FetchPolicy::DirectThenRender);
        assert!(config.exclusions.domains.contains(&"sentry.io".to_string()));
    }

    #[test]
    fn test_render_config_builder() {
        let config = RenderConfig::builder()
            .headless(false)
            .sandbox(true)
            .settle_ms(500)
            .navigation_timeout_ms(5_000)
            .chrome_path("/usr/bin/chromium")
            .user_agent("TestBot/1.0")
            .arg("--mute-audio")
            .build();

        assert!(!config.headless);
        assert!(config.sandbox);
        assert_eq!(config.settle_ms, 500);
        assert_eq!(config.navigation_timeout_ms, 5_000);
        assert_eq!(config.chrome_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.user_agent.as_deref(), Some("TestBot/1.0"));
        assert_eq!(config.extra_args, vec!["--mute-audio"]);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "http": { "timeout_ms": 2500 }, "policy": "render_only" }"#;
        let config: ScraperConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.http.timeout_ms, 2500);
        assert_eq!(config.http.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.policy, FetchPolicy::RenderOnly);
    }

    #[test]
    fn test_render_for_host_json() {
        let json = r#"{ "policy": { "render_for_host": "(^|\\.)instagram\\.com$" } }"#;
        let config: ScraperConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.policy,
            FetchPolicy::RenderForHost("(^|\\.)instagram\\.com$".to_string())
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = ScraperConfig::default();
        config.http.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http.timeout_ms"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mailsift.json");
        std::fs::write(
            &path,
            r#"{ "render": { "settle_ms": 500 }, "policy": "direct_only" }"#,
        )
        .unwrap();

        let config = ScraperConfig::from_file(&path).unwrap();
        assert_eq!(config.render.settle_ms, 500);
        assert_eq!(config.policy, FetchPolicy::DirectOnly);
        assert_eq!(config.http, HttpConfig::default());
    }

    #[test]
    fn test_from_file_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = ScraperConfig::from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        let err = ScraperConfig::from_file(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let config = ScraperConfig {
            policy: FetchPolicy::RenderForHost("(".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
