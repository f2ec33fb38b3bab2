//! Error types for mailsift
//!
//! This module provides the error hierarchy used across the fetch,
//! extraction, input, and export layers, built on `thiserror`.

use thiserror::Error;

/// The main error type for mailsift operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Target list errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Result export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while retrieving a page, by either strategy.
///
/// Every variant names the target URL so the message can stand alone in
/// a result row.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request did not complete within the configured timeout
    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout {
        /// Target URL
        url: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        /// Target URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Connection, TLS, redirect or body read failure
    #[error("network error for {url}: {message}")]
    Network {
        /// Target URL
        url: String,
        /// Underlying error message
        message: String,
    },

    /// Browser launch, navigation or content capture failure
    #[error("render failed for {url}: {message}")]
    Render {
        /// Target URL
        url: String,
        /// Underlying error message
        message: String,
    },

    /// Target could not be parsed as a URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Per-target failure, after every strategy the policy allows has run
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The only strategy attempted failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Direct retrieval failed and the render fallback failed too
    #[error("{render} (direct fetch: {direct})")]
    Exhausted {
        /// Error from direct retrieval
        direct: FetchError,
        /// Error from rendered retrieval
        render: FetchError,
    },
}

impl FetchError {
    /// Whether this error came from the rendered retrieval path
    pub fn is_render(&self) -> bool {
        matches!(self, FetchError::Render { .. })
    }
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    /// Navigation did not finish
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Navigation exceeded its bound
    #[error("Navigation timed out after {0}ms")]
    Timeout(u64),

    /// Could not read the rendered document
    #[error("Failed to read page content: {0}")]
    ContentFailed(String),

    /// Browser did not shut down cleanly
    #[error("Failed to close browser: {0}")]
    CloseFailed(String),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// Path that was parsed
        path: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Host pattern is not a valid regex
    #[error("invalid host pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Regex compiler message
        message: String,
    },

    /// HTTP client could not be constructed
    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),

    /// A value is outside its allowed range
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Why it was rejected
        message: String,
    },
}

/// Target list errors
#[derive(Error, Debug)]
pub enum InputError {
    /// CSV input has no `URL` column
    #[error("CSV file must contain a '{0}' column")]
    MissingUrlColumn(&'static str),

    /// CSV could not be parsed
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result export errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failure
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying writer failure
    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for mailsift operations
pub type Result<T> = std::result::Result<T, Error>;
