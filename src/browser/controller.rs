//! Browser lifecycle management
//!
//! This module handles browser launch, page creation and shutdown. A
//! controller owns exactly one Chromium process; it is launched per render
//! and never shared.

use crate::config::RenderConfig;
use crate::error::BrowserError;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Arguments every launch carries: no GPU, quiet Chromium logging
pub const BASE_ARGS: &[&str] = &["--disable-gpu", "--log-level=3"];

/// Chrome argument list derived from a render config
pub fn launch_args(config: &RenderConfig) -> Vec<String> {
    let mut args: Vec<String> = BASE_ARGS.iter().map(|a| a.to_string()).collect();
    if !config.sandbox {
        args.push("--no-sandbox".to_string());
    }
    args.extend(config.extra_args.iter().cloned());
    args
}

/// Handle on a running headless browser
pub struct BrowserController {
    browser: Browser,
    handler: Option<JoinHandle<()>>,
    user_agent: Option<String>,
}

impl BrowserController {
    /// Launch a browser with the given render config
    #[instrument(skip(config))]
    pub async fn launch(config: &RenderConfig) -> Result<Self, BrowserError> {
        info!("Launching browser: headless={}", config.headless);

        let mut builder = CdpBrowserConfig::builder();

        if !config.headless {
            builder = builder.with_head();
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        for arg in launch_args(config) {
            builder = builder.arg(arg);
        }

        let cdp_config = builder.build().map_err(BrowserError::ConfigError)?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
            debug!("Browser handler finished");
        });

        info!("Browser launched");

        Ok(Self {
            browser,
            handler: Some(handler_task),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Open a blank page, applying the configured user agent
    #[instrument(skip(self))]
    pub async fn new_page(&self) -> Result<Page, BrowserError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;

        if let Some(ref ua) = self.user_agent {
            page.set_user_agent(ua.as_str())
                .await
                .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;
        }

        debug!("Created new page");
        Ok(page)
    }

    /// Close the browser and wait briefly for its event handler to stop
    #[instrument(skip(self))]
    pub async fn close(mut self) -> Result<(), BrowserError> {
        info!("Closing browser");

        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::CloseFailed(e.to_string()));

        if let Some(handler) = self.handler.take() {
            if tokio::time::timeout(Duration::from_secs(5), handler)
                .await
                .is_err()
            {
                warn!("Browser handler did not stop within 5s");
            }
        }

        info!("Browser closed");
        closed
    }
}

impl Drop for BrowserController {
    // Reached without close() only when a render is unwound early;
    // chromiumoxide kills the child process when `browser` drops.
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}
