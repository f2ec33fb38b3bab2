//! Batch orchestration
//!
//! [`Scraper`] runs the fetch and extract pipeline for each target in input
//! order, one at a time. Every failure is folded into the target's
//! [`Outcome`], so one bad target never stops the batch.

use crate::config::ScraperConfig;
use crate::error::{ConfigError, FetchError, ScrapeError};
use crate::extraction::EmailExtractor;
use crate::fetch::{
    BrowserRenderer, CompiledPolicy, FetchPolicy, HttpFetcher, PageSource, Strategy,
};
use crate::input::normalize_target;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Outcome text when a page yields no usable address
pub const NO_EMAIL_MARKER: &str = "No valid email found";

/// What scraping one target produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum Outcome {
    /// Sorted, deduplicated addresses
    Found(Vec<String>),
    /// Page retrieved, nothing survived filtering
    NoneFound,
    /// Retrieval failed; the message names the target
    Failed(String),
}

impl Outcome {
    fn from_emails(emails: BTreeSet<String>) -> Self {
        if emails.is_empty() {
            Outcome::NoneFound
        } else {
            Outcome::Found(emails.into_iter().collect())
        }
    }

    /// Addresses found, empty for the other outcomes
    pub fn emails(&self) -> &[String] {
        match self {
            Outcome::Found(emails) => emails,
            _ => &[],
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found(emails) => write!(f, "{}", emails.join(", ")),
            Outcome::NoneFound => write!(f, "{}", NO_EMAIL_MARKER),
            Outcome::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

/// One row of output: a normalized target and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// Normalized target URL
    pub url: String,
    /// What the pipeline produced
    pub outcome: Outcome,
}

/// A batch of raw targets to scrape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Raw target strings, in the order results should appear
    pub targets: Vec<String>,
}

impl ScrapeRequest {
    /// Build a request from any list of targets
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }
}

/// Results of a batch, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// One result per requested target
    pub results: Vec<ScrapeResult>,
    /// Wall time for the batch in milliseconds
    pub duration_ms: u64,
}

impl ScrapeReport {
    /// Targets with at least one address
    pub fn found(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Found(_)))
    }

    /// Targets retrieved without a usable address
    pub fn none_found(&self) -> usize {
        self.count(|o| matches!(o, Outcome::NoneFound))
    }

    /// Targets that could not be retrieved
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Runs the fetch and extract pipeline over targets
pub struct Scraper {
    direct: Box<dyn PageSource>,
    renderer: Box<dyn PageSource>,
    extractor: EmailExtractor,
    policy: CompiledPolicy,
}

impl Scraper {
    /// Create a builder
    pub fn builder() -> ScraperBuilder {
        ScraperBuilder::default()
    }

    /// Build a scraper with the real HTTP and browser sources
    pub fn from_config(config: ScraperConfig) -> crate::Result<Self> {
        Ok(Self::builder().config(config).build()?)
    }

    /// The active policy
    pub fn policy(&self) -> &FetchPolicy {
        self.policy.policy()
    }

    /// Scrape every target in order
    pub async fn scrape(&self, request: ScrapeRequest) -> ScrapeReport {
        self.scrape_with_progress(request, |_, _, _| {}).await
    }

    /// Scrape every target in order, reporting each result as it lands
    ///
    /// The callback receives the 1-based position, the batch size, and the
    /// finished result.
    #[instrument(skip_all, fields(targets = request.targets.len()))]
    pub async fn scrape_with_progress<F>(
        &self,
        request: ScrapeRequest,
        mut on_result: F,
    ) -> ScrapeReport
    where
        F: FnMut(usize, usize, &ScrapeResult),
    {
        let start = Instant::now();
        let total = request.targets.len();
        let mut results = Vec::with_capacity(total);

        for (i, raw) in request.targets.iter().enumerate() {
            let result = self.scrape_one(raw).await;
            on_result(i + 1, total, &result);
            results.push(result);
        }

        let report = ScrapeReport {
            results,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "Batch done in {}ms: {} found, {} empty, {} failed",
            report.duration_ms,
            report.found(),
            report.none_found(),
            report.failed()
        );
        report
    }

    /// Normalize and scrape a single target
    #[instrument(skip(self))]
    pub async fn scrape_one(&self, raw: &str) -> ScrapeResult {
        let url = normalize_target(raw);
        info!("Scraping: {}", url);

        let outcome = match self.run(&url).await {
            Ok(emails) => Outcome::from_emails(emails),
            Err(e) => {
                warn!("Scrape failed for {}: {}", url, e);
                Outcome::Failed(e.to_string())
            }
        };

        debug!("{} -> {}", url, outcome);
        ScrapeResult { url, outcome }
    }

    async fn run(&self, url: &str) -> Result<BTreeSet<String>, ScrapeError> {
        match self.policy.strategy_for(url) {
            Strategy::Direct => Ok(self.fetch_and_extract(self.direct.as_ref(), url).await?),
            Strategy::Render => Ok(self.fetch_and_extract(self.renderer.as_ref(), url).await?),
            Strategy::DirectThenRender => {
                let direct = self.fetch_and_extract(self.direct.as_ref(), url).await;
                let direct_error = match direct {
                    Ok(emails) if !emails.is_empty() => return Ok(emails),
                    Ok(_) => {
                        info!("No emails via {} for {}, rendering", self.direct.name(), url);
                        None
                    }
                    Err(e) => {
                        warn!(
                            "{} failed, falling back to {}: {}",
                            self.direct.name(),
                            self.renderer.name(),
                            e
                        );
                        Some(e)
                    }
                };

                match self.fetch_and_extract(self.renderer.as_ref(), url).await {
                    Ok(emails) => Ok(emails),
                    Err(render) => Err(match direct_error {
                        Some(direct) => ScrapeError::Exhausted { direct, render },
                        None => ScrapeError::Fetch(render),
                    }),
                }
            }
        }
    }

    async fn fetch_and_extract(
        &self,
        source: &dyn PageSource,
        url: &str,
    ) -> Result<BTreeSet<String>, FetchError> {
        let html = source.fetch(url).await?;
        let emails = self.extractor.extract(&html);
        debug!("{} found {} emails for {}", source.name(), emails.len(), url);
        Ok(emails)
    }
}

/// Builder for [`Scraper`]; sources default to [`HttpFetcher`] and
/// [`BrowserRenderer`] built from the config
#[derive(Default)]
pub struct ScraperBuilder {
    config: ScraperConfig,
    direct: Option<Box<dyn PageSource>>,
    renderer: Option<Box<dyn PageSource>>,
}

impl ScraperBuilder {
    /// Use this configuration
    pub fn config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the fetch policy
    pub fn policy(mut self, policy: FetchPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Replace the direct retrieval source
    pub fn direct_source(mut self, source: impl PageSource + 'static) -> Self {
        self.direct = Some(Box::new(source));
        self
    }

    /// Replace the rendered retrieval source
    pub fn render_source(mut self, source: impl PageSource + 'static) -> Self {
        self.renderer = Some(Box::new(source));
        self
    }

    /// Validate the config and assemble the scraper
    pub fn build(self) -> Result<Scraper, ConfigError> {
        self.config.validate()?;
        let policy = self.config.policy.compile()?;

        let direct = match self.direct {
            Some(source) => source,
            None => Box::new(HttpFetcher::new(&self.config.http)?),
        };
        let renderer = match self.renderer {
            Some(source) => source,
            None => Box::new(BrowserRenderer::new(self.config.render.clone())),
        };

        Ok(Scraper {
            direct,
            renderer,
            extractor: EmailExtractor::new(self.config.exclusions),
            policy,
        })
    }
}
