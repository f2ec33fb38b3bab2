//! Content extraction module
//!
//! Turns fetched markup into a filtered set of email addresses: visible
//! text flattening, pattern matching, and exclusion rules.

pub mod emails;
pub mod rules;
pub mod visible;

pub use emails::{candidates, EmailExtractor, EMAIL_PATTERN};
pub use rules::ExclusionRules;
pub use visible::visible_text;
