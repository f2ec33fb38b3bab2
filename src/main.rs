//! mailsift command line
//!
//! Reads targets, scrapes each one in order, prints a result line per
//! target, and writes the results as CSV.

use anyhow::{bail, Context};
use clap::Parser;
use mailsift::export::{self, CsvLayout};
use mailsift::input::{targets_from_csv_file, targets_from_lines};
use mailsift::{FetchPolicy, ScrapeRequest, Scraper, ScraperConfig};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract contact email addresses from web pages
#[derive(Parser, Debug)]
#[command(name = "mailsift")]
#[command(version)]
#[command(about = "Extract contact email addresses from web pages")]
struct Args {
    /// URLs to scrape (ignored when --csv or --list is given)
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// CSV file with a 'URL' column
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Text file with one URL per line ('-' reads stdin)
    #[arg(long, value_name = "FILE")]
    list: Option<String>,

    /// Where to write the results CSV ('-' writes stdout)
    #[arg(short, long, value_name = "FILE", default_value = "emails.csv")]
    output: String,

    /// CSV header layout: standard (Website,Email) or social (URL,Emails Found)
    #[arg(long, default_value = "standard")]
    layout: CsvLayout,

    /// Retrieval policy: direct-only, direct-then-render, render-only
    #[arg(long)]
    policy: Option<FetchPolicy>,

    /// Always render hosts matching this regex
    #[arg(long, value_name = "REGEX")]
    render_host: Option<String>,

    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Direct request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Delay after page load before reading a rendered page, in milliseconds
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// User agent for direct requests
    #[arg(long)]
    user_agent: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn build_config(args: &Args) -> anyhow::Result<ScraperConfig> {
    let mut config = match args.config {
        Some(ref path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };

    if let Some(ref policy) = args.policy {
        config.policy = policy.clone();
    }
    if let Some(ref pattern) = args.render_host {
        config.policy = FetchPolicy::RenderForHost(pattern.clone());
    }
    if let Some(ms) = args.timeout_ms {
        config.http.timeout_ms = ms;
    }
    if let Some(ms) = args.settle_ms {
        config.render.settle_ms = ms;
    }
    if let Some(ref path) = args.chrome_path {
        config.render.chrome_path = Some(path.clone());
    }
    if let Some(ref ua) = args.user_agent {
        config.http.user_agent = ua.clone();
    }

    config.validate()?;
    Ok(config)
}

fn read_targets(args: &Args) -> anyhow::Result<Vec<String>> {
    if let Some(ref path) = args.csv {
        return targets_from_csv_file(path)
            .with_context(|| format!("cannot read {}", path.display()));
    }

    if let Some(ref path) = args.list {
        let mut text = String::new();
        if path == "-" {
            io::stdin()
                .read_to_string(&mut text)
                .context("cannot read stdin")?;
        } else {
            text = std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path))?;
        }
        return Ok(targets_from_lines(&text));
    }

    Ok(args.urls.clone())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = build_config(&args)?;
    let targets = read_targets(&args)?;
    if targets.is_empty() {
        bail!("no targets given: pass URLs, --csv FILE or --list FILE");
    }

    tracing::info!(
        "mailsift {} scraping {} targets (policy: {})",
        mailsift::VERSION,
        targets.len(),
        config.policy
    );

    let scraper = Scraper::from_config(config)?;
    let to_stdout = args.output == "-";

    let report = scraper
        .scrape_with_progress(ScrapeRequest { targets }, |i, total, result| {
            tracing::info!("[{}/{}] {} -> {}", i, total, result.url, result.outcome);
        })
        .await;

    if to_stdout {
        export::write_csv(io::stdout().lock(), &report.results, args.layout)
            .context("cannot write CSV to stdout")?;
    } else {
        let mut out = io::stdout().lock();
        for result in &report.results {
            writeln!(out, "{} → {}", result.url, result.outcome)?;
        }
        export::write_csv_file(&args.output, &report.results, args.layout)
            .with_context(|| format!("cannot write {}", args.output))?;
        writeln!(out, "Results written to {}", args.output)?;
    }

    tracing::info!(
        "{} found, {} without email, {} failed in {}ms",
        report.found(),
        report.none_found(),
        report.failed(),
        report.duration_ms
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["mailsift", "example.com"]);
        assert_eq!(args.urls, vec!["example.com"]);
        assert_eq!(args.output, "emails.csv");
        assert_eq!(args.layout, CsvLayout::Standard);
        assert!(args.policy.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "mailsift",
            "--policy",
            "direct-only",
            "--timeout-ms",
            "2500",
            "--settle-ms",
            "0",
            "--layout",
            "social",
            "a.com",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.policy, FetchPolicy::DirectOnly);
        assert_eq!(config.http.timeout_ms, 2500);
        assert_eq!(config.render.settle_ms, 0);
        assert_eq!(args.layout, CsvLayout::Social);
    }

    #[test]
    fn test_render_host_wins_over_policy() {
        let args = Args::parse_from([
            "mailsift",
            "--policy",
            "render-only",
            "--render-host",
            r"(^|\.)instagram\.com$",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(
            config.policy,
            FetchPolicy::RenderForHost(r"(^|\.)instagram\.com$".to_string())
        );
    }

    #[test]
    fn test_bad_render_host_is_rejected() {
        let args = Args::parse_from(["mailsift", "--render-host", "("]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_read_targets_from_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "a.com\n\nb.com\n").unwrap();
        let args = Args::parse_from(["mailsift", "--list", path.to_str().unwrap()]);
        assert_eq!(read_targets(&args).unwrap(), vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_csv_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.csv");
        std::fs::write(&path, "URL\nfrom-csv.com\n").unwrap();
        let args = Args::parse_from([
            "mailsift",
            "--csv",
            path.to_str().unwrap(),
            "positional.com",
        ]);
        assert_eq!(read_targets(&args).unwrap(), vec!["from-csv.com"]);
    }
}
