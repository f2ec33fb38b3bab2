//! Fetch policy selection
//!
//! A [`FetchPolicy`] decides, per target, which retrieval strategies run
//! and in what order.

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which retrieval strategies the scraper uses
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    /// Plain HTTP only
    DirectOnly,
    /// Plain HTTP, then a browser render when it fails or finds nothing
    #[default]
    DirectThenRender,
    /// Browser render only
    RenderOnly,
    /// Always render hosts matching the regex; other hosts use `DirectThenRender`
    RenderForHost(String),
}

impl FetchPolicy {
    /// Compile the policy, validating any host pattern
    pub fn compile(&self) -> Result<CompiledPolicy, ConfigError> {
        let host = match self {
            FetchPolicy::RenderForHost(pattern) => Some(Regex::new(pattern).map_err(|e| {
                ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                }
            })?),
            _ => None,
        };
        Ok(CompiledPolicy {
            policy: self.clone(),
            host,
        })
    }
}

impl fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchPolicy::DirectOnly => write!(f, "direct-only"),
            FetchPolicy::DirectThenRender => write!(f, "direct-then-render"),
            FetchPolicy::RenderOnly => write!(f, "render-only"),
            FetchPolicy::RenderForHost(pattern) => write!(f, "render-for-host={}", pattern),
        }
    }
}

impl FromStr for FetchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(pattern) = s.strip_prefix("render-for-host=") {
            return Ok(FetchPolicy::RenderForHost(pattern.to_string()));
        }
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "direct-only" | "direct" => Ok(FetchPolicy::DirectOnly),
            "direct-then-render" | "fallback" => Ok(FetchPolicy::DirectThenRender),
            "render-only" | "render" => Ok(FetchPolicy::RenderOnly),
            other => Err(format!(
                "unknown policy '{}': expected direct-only, direct-then-render, \
                 render-only or render-for-host=<regex>",
                other
            )),
        }
    }
}

/// Strategy chosen for a single target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Plain HTTP only
    Direct,
    /// Plain HTTP with render fallback
    DirectThenRender,
    /// Browser render only
    Render,
}

/// A policy with its host pattern compiled
#[derive(Debug, Clone)]
pub struct CompiledPolicy {
    policy: FetchPolicy,
    host: Option<Regex>,
}

impl CompiledPolicy {
    /// The source policy
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Strategy for a normalized target URL
    pub fn strategy_for(&self, url: &str) -> Strategy {
        match self.policy {
            FetchPolicy::DirectOnly => Strategy::Direct,
            FetchPolicy::DirectThenRender => Strategy::DirectThenRender,
            FetchPolicy::RenderOnly => Strategy::Render,
            FetchPolicy::RenderForHost(_) => {
                let matched = match (&self.host, host_of(url)) {
                    (Some(re), Some(host)) => re.is_match(&host),
                    _ => false,
                };
                if matched {
                    Strategy::Render
                } else {
                    Strategy::DirectThenRender
                }
            }
        }
    }
}

/// Lowercase host of a URL, if it parses and has one
pub fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}
