//! mailsift - Contact Email Extraction from Web Pages
//!
//! This crate fetches web pages, reduces them to visible text, and pulls
//! out contact email addresses, filtering tracking-vendor addresses and
//! image filenames that happen to look like emails.
//!
//! # Features
//!
//! - **Direct retrieval**: plain HTTP GET with a browser-like user agent
//! - **Rendered retrieval**: headless Chromium via ChromiumOxide (CDP) for
//!   pages that build their content client-side
//! - **Fetch policies**: direct only, direct with render fallback, render
//!   only, or render for matching hosts
//! - **CSV in and out**: `URL` column input, `Website,Email` output
//!
//! # Architecture
//!
//! ```text
//! targets ──▶ Scraper ──▶ FetchPolicy
//!                │            │
//!                │      ┌─────┴───────┐
//!                │      ▼             ▼
//!                │  HttpFetcher  BrowserRenderer (CDP)
//!                │      │             │
//!                │      └──── HTML ───┘
//!                ▼              │
//!          ScrapeReport ◀── EmailExtractor
//!                │        (visible text, pattern, exclusions)
//!                ▼
//!           CSV export
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mailsift::{ScrapeRequest, Scraper, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scraper = Scraper::from_config(ScraperConfig::default())?;
//!     let report = scraper
//!         .scrape(ScrapeRequest::new(["example.com"]))
//!         .await;
//!
//!     for result in &report.results {
//!         println!("{} -> {}", result.url, result.outcome);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod fetch;
pub mod input;
pub mod scrape;

// Re-exports for convenience
pub use config::{ExclusionRules, ScraperConfig};
pub use error::{Error, Result};
pub use export::CsvLayout;
pub use extraction::EmailExtractor;
pub use fetch::{BrowserRenderer, FetchPolicy, HttpFetcher, PageSource};
pub use scrape::{
    Outcome, ScrapeReport, ScrapeRequest, ScrapeResult, Scraper, ScraperBuilder, NO_EMAIL_MARKER,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
