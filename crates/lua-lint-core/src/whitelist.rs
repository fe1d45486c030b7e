//! Whitelist matching shared by rules that support exemptions.

use regex::Regex;

/// Returns `true` iff any pattern matches the candidate name.
///
/// An empty pattern list never matches; the scan short-circuits on the
/// first matching pattern.
#[must_use]
pub fn matches(patterns: &[Regex], name: &str) -> bool {
    patterns.iter().any(|p| p.is_match(name))
}
