//! Page retrieval
//!
//! Two [`PageSource`] implementations cover the retrieval strategies: a
//! plain HTTP GET ([`HttpFetcher`]) and a headless browser render
//! ([`BrowserRenderer`]). [`FetchPolicy`] decides which of them run.

pub mod http;
pub mod policy;
pub mod render;

pub use http::HttpFetcher;
pub use policy::{host_of, CompiledPolicy, FetchPolicy, Strategy};
pub use render::BrowserRenderer;

use crate::error::FetchError;
use async_trait::async_trait;

/// Something that turns a URL into page markup
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Retrieve the markup for a normalized URL
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
