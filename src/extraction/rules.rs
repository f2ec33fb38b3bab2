//! Candidate exclusion rules

use serde::{Deserialize, Serialize};

/// Domain substrings belonging to tracking and error-reporting vendors
pub const DEFAULT_EXCLUDED_DOMAINS: &[&str] = &["sentry.io", "wixpress.com", "sentry.wixpress.com"];

/// Asset suffixes that the email pattern can pick up from retina filenames
/// such as `logo@2x.png`
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".svg", ".gif", ".webp"];

/// Filters applied to every email candidate, compared case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionRules {
    /// Reject candidates containing any of these substrings
    pub domains: Vec<String>,
    /// Reject candidates ending with any of these suffixes
    pub image_extensions: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            domains: DEFAULT_EXCLUDED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ExclusionRules {
    /// Rules that exclude nothing
    pub fn none() -> Self {
        Self {
            domains: Vec::new(),
            image_extensions: Vec::new(),
        }
    }

    /// Whether a candidate should be dropped
    pub fn is_excluded(&self, candidate: &str) -> bool {
        let lower = candidate.to_lowercase();
        self.domains
            .iter()
            .any(|domain| lower.contains(&domain.to_lowercase()))
            || self
                .image_extensions
                .iter()
                .any(|ext| lower.ends_with(&ext.to_lowercase()))
    }
}
