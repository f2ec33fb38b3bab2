//! Rendered retrieval through a headless browser
//!
//! Each call launches its own browser and closes it before returning,
//! whether navigation succeeded or not.

use crate::browser::{BrowserController, NavigationOptions, PageNavigator};
use crate::config::RenderConfig;
use crate::error::{BrowserError, FetchError};
use crate::fetch::PageSource;
use async_trait::async_trait;
use tracing::{instrument, warn};

/// Renders a page in a fresh Chromium instance and returns its HTML
#[derive(Debug, Clone, Default)]
pub struct BrowserRenderer {
    config: RenderConfig,
}

impl BrowserRenderer {
    /// Create a renderer with the given browser settings
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Browser settings in use
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

fn render_error(url: &str, err: BrowserError) -> FetchError {
    FetchError::Render {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl PageSource for BrowserRenderer {
    fn name(&self) -> &str {
        "browser"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let controller = BrowserController::launch(&self.config)
            .await
            .map_err(|e| render_error(url, e))?;

        let options = NavigationOptions::from(&self.config);
        let rendered = async {
            let page = controller.new_page().await?;
            PageNavigator::render(&page, url, &options).await
        }
        .await;

        if let Err(e) = controller.close().await {
            warn!("Browser close after {} failed: {}", url, e);
        }

        rendered.map_err(|e| render_error(url, e))
    }
}
