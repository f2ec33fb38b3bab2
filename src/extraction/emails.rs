//! Email address extraction
//!
//! Matches the email token pattern over visible text and filters the
//! candidates through [`ExclusionRules`]. Results are returned as a sorted
//! set so the joined output is deterministic.

use crate::extraction::rules::ExclusionRules;
use crate::extraction::visible::visible_text;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Email token pattern. The final segment is limited to 2-4 letters, so a
/// longer top-level domain is cut short rather than rejected.
pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Extracts filtered email addresses from markup or text
#[derive(Debug, Clone, Default)]
pub struct EmailExtractor {
    rules: ExclusionRules,
}

impl EmailExtractor {
    /// Create an extractor with the given exclusion rules
    pub fn new(rules: ExclusionRules) -> Self {
        Self { rules }
    }

    /// Exclusion rules in use
    pub fn rules(&self) -> &ExclusionRules {
        &self.rules
    }

    /// Extract emails from raw HTML
    #[instrument(skip_all, fields(html_len = html.len()))]
    pub fn extract(&self, html: &str) -> BTreeSet<String> {
        let text = visible_text(html);
        self.extract_from_text(&text)
    }

    /// Extract emails from already flattened visible text
    pub fn extract_from_text(&self, text: &str) -> BTreeSet<String> {
        let candidates = candidates(text);
        let total = candidates.len();

        let emails: BTreeSet<String> = candidates
            .into_iter()
            .filter(|candidate| !self.rules.is_excluded(candidate))
            .collect();

        debug!(
            "{} candidates, {} kept after exclusions",
            total,
            emails.len()
        );
        emails
    }
}

/// Every distinct substring of `text` matching the email pattern, unfiltered
pub fn candidates(text: &str) -> BTreeSet<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
