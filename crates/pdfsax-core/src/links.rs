//! Link token extraction from plain text.
//!
//! [`LINK_PATTERN`] recognizes `scheme:body[#fragment]` tokens. The accepted
//! token shapes are a compatibility contract: outlink counts must not drift
//! between releases, so the pattern is treated as a fixed constant.

use regex::Regex;

use crate::error::ExtractError;

/// Error raised when a link pattern does not compile.
pub type PatternError = regex::Error;

/// Lexical grammar for link tokens.
///
/// - scheme: a letter followed by 1–120 letters, digits, `+`, `.` or `-`
/// - body: one of `[A-Za-z0-9/]`, then 1–333 path characters or
///   percent-encoded octets
/// - fragment (optional): `#`, an alphanumeric, then up to 1000 more
///   fragment characters
pub const LINK_PATTERN: &str = concat!(
    "([A-Za-z][A-Za-z0-9+.-]{1,120}:",
    "[A-Za-z0-9/](([A-Za-z0-9$_.+!*,;/?:@&~=-])|%[A-Fa-f0-9]{2}){1,333}",
    "(#([a-zA-Z0-9][a-zA-Z0-9$_.+!*,;/?:@&~=%-]{0,1000}))?)",
);

/// Compiled link grammar.
///
/// Matches are reported leftmost-first: the earliest-starting match wins and
/// each repetition is greedy. Matches are neither deduplicated nor validated.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    regex: Regex,
}

impl LinkExtractor {
    /// Compile the standard [`LINK_PATTERN`].
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ConfigurationDefect`] if the pattern does not
    /// compile.
    pub fn new() -> Result<Self, ExtractError> {
        Self::with_pattern(LINK_PATTERN)
    }

    /// Compile a custom link pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ConfigurationDefect`] if `pattern` is not a
    /// valid regular expression.
    pub fn with_pattern(pattern: &str) -> Result<Self, ExtractError> {
        Self::compile(pattern).map_err(|source| ExtractError::ConfigurationDefect { source })
    }

    /// Compile a custom link pattern, keeping the raw compiler error.
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] if `pattern` is not a valid regular
    /// expression.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        Regex::new(pattern).map(|regex| Self { regex })
    }

    /// The source pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Iterate over link tokens in order of their starting offset.
    pub fn find_links<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.regex.find_iter(text).map(|m| m.as_str())
    }

    /// Collect all link tokens in `text`.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.find_links(text).map(str::to_string).collect()
    }
}
