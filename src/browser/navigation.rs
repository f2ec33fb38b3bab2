//! Page navigation and document capture
//!
//! Navigation is bounded by a timeout; after the page loads the navigator
//! waits a fixed settling interval so client-side scripts can populate the
//! document before its HTML is read.

use crate::config::RenderConfig;
use crate::error::BrowserError;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Options for page navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOptions {
    /// Navigation timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// Settling delay after load in milliseconds (default: 3000)
    pub settle_ms: u64,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            settle_ms: 3_000,
        }
    }
}

impl From<&RenderConfig> for NavigationOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            timeout_ms: config.navigation_timeout_ms,
            settle_ms: config.settle_ms,
        }
    }
}

/// URL validation for browser navigation
pub struct UrlValidator;

impl UrlValidator {
    /// Validate a URL for navigation
    pub fn validate(url: &str) -> std::result::Result<(), String> {
        if url.is_empty() {
            return Err("URL cannot be empty".to_string());
        }

        let parsed = url::Url::parse(url).map_err(|e| format!("{}: {}", e, url))?;
        if !matches!(parsed.scheme(), "http" | "https" | "file") {
            return Err(format!(
                "URL must start with http://, https://, or file://: {}",
                url
            ));
        }

        Ok(())
    }
}

/// Drives a page to a URL and reads back the rendered document
pub struct PageNavigator;

impl PageNavigator {
    /// Navigate, wait for the settling interval, and return the page HTML
    #[instrument(skip(page, opts))]
    pub async fn render(
        page: &Page,
        url: &str,
        opts: &NavigationOptions,
    ) -> Result<String, BrowserError> {
        Self::goto(page, url, opts).await?;
        Self::settle(opts).await;
        Self::document_html(page).await
    }

    /// Navigate to a URL within the configured timeout
    pub async fn goto(page: &Page, url: &str, opts: &NavigationOptions) -> Result<(), BrowserError> {
        UrlValidator::validate(url).map_err(BrowserError::NavigationFailed)?;

        info!("Navigating to: {}", url);

        let timeout = Duration::from_millis(opts.timeout_ms);
        tokio::time::timeout(timeout, page.goto(url))
            .await
            .map_err(|_| BrowserError::Timeout(opts.timeout_ms))?
            .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;

        debug!("Navigation complete: {}", url);
        Ok(())
    }

    /// Wait for asynchronous content to populate
    pub async fn settle(opts: &NavigationOptions) {
        if opts.settle_ms > 0 {
            debug!("Settling for {}ms", opts.settle_ms);
            tokio::time::sleep(Duration::from_millis(opts.settle_ms)).await;
        }
    }

    /// Serialized HTML of the current document
    pub async fn document_html(page: &Page) -> Result<String, BrowserError> {
        page.content()
            .await
            .map_err(|e| BrowserError::ContentFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_options_default() {
        let opts = NavigationOptions::default();
        assert_eq!(opts.timeout_ms, 30_000);
        assert_eq!(opts.settle_ms, 3_000);
    }

    #[test]
    fn test_navigation_options_from_render_config() {
        let config = RenderConfig::builder()
            .settle_ms(250)
            .navigation_timeout_ms(9_000)
            .build();
        let opts = NavigationOptions::from(&config);
        assert_eq!(opts.settle_ms, 250);
        assert_eq!(opts.timeout_ms, 9_000);
    }

    #[test]
    fn test_url_validation_valid() {
        assert!(UrlValidator::validate("http://example.com").is_ok());
        assert!(UrlValidator::validate("https://example.com/contact?x=1#team").is_ok());
        assert!(UrlValidator::validate("file:///tmp/page.html").is_ok());
    }

    #[test]
    fn test_url_validation_empty() {
        let result = UrlValidator::validate("");
        assert!(result.unwrap_err().contains("empty"));
    }

    #[test]
    fn test_url_validation_invalid_protocol() {
        let result = UrlValidator::validate("ftp://example.com");
        assert!(result.unwrap_err().contains("must start with"));
    }

    #[test]
    fn test_url_validation_unparseable() {
        assert!(UrlValidator::validate("https://").is_err());
        assert!(UrlValidator::validate("example.com").is_err());
    }

    #[tokio::test]
    async fn test_settle_zero_returns_immediately() {
        let opts = NavigationOptions {
            timeout_ms: 1_000,
            settle_ms: 0,
        };
        let start = std::time::Instant::now();
        PageNavigator::settle(&opts).await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
