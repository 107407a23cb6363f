//! Error types for country data and alias loading.
//!
//! Messages follow the What/Why/Fix shape used across the project.

use thiserror::Error;

/// Errors that can occur while obtaining country data or building the resolver.
///
/// Every variant is fatal for a run: the resolver cannot operate without
/// a complete country list.
#[derive(Debug, Clone, Error)]
pub enum CountryError {
    /// The country endpoint could not be reached
    #[error("cannot fetch countries from '{url}': {reason}\n  Suggestion: {suggestion}")]
    FetchFailed {
        /// Endpoint that was requested
        url: String,
        /// Transport-level failure
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The country endpoint answered with a non-success status
    #[error(
        "country endpoint '{url}' returned HTTP {status}\n  Suggestion: Check the endpoint URL or use --countries-file with a saved copy"
    )]
    HttpStatus {
        /// Endpoint that was requested
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The country payload is not the expected JSON array
    #[error("cannot decode country data from {origin}: {reason}\n  Suggestion: {suggestion}")]
    Decode {
        /// URL or path the payload came from
        origin: String,
        /// Decoder message
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// A local country file could not be read
    #[error("cannot read country file '{path}': {reason}\n  Suggestion: Check the path and file permissions")]
    ReadFile {
        /// File path
        path: String,
        /// I/O failure
        reason: String,
    },

    /// The payload decoded but contained no countries
    #[error("no countries found in {origin}\n  Suggestion: Check that the source returns the full country list")]
    Empty {
        /// URL or path the payload came from
        origin: String,
    },

    /// The HTTP client could not be constructed
    #[error("HTTP client construction failed: {reason}")]
    Client {
        /// Builder failure
        reason: String,
    },

    /// The phrase pattern could not be compiled
    #[error("cannot build country phrase matcher: {reason}")]
    Matcher {
        /// Regex compiler message
        reason: String,
    },
}

impl CountryError {
    /// Creates a `FetchFailed` error for a transport failure.
    #[must_use]
    pub fn fetch_failed(url: &str, reason: &str) -> Self {
        Self::FetchFailed {
            url: url.to_string(),
            reason: reason.to_string(),
            suggestion: "Check your network connection or use --countries-file".to_string(),
        }
    }

    /// Creates a `Decode` error for a malformed payload.
    #[must_use]
    pub fn decode(origin: &str, reason: &str) -> Self {
        Self::Decode {
            origin: origin.to_string(),
            reason: reason.to_string(),
            suggestion: "Expected a JSON array of objects with `name` and `alpha3Code`"
                .to_string(),
        }
    }

    /// Creates a `ReadFile` error.
    #[must_use]
    pub fn read_file(path: &str, reason: &str) -> Self {
        Self::ReadFile {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors that can occur while reading user alias definitions.
#[derive(Debug, Clone, Error)]
pub enum AliasError {
    /// A line is not of the form `alias = Canonical Name`
    #[error(
        "invalid alias definition on line {line}: '{content}'\n  Suggestion: Use `alias = Canonical Name`, one per line"
    )]
    InvalidLine {
        /// 1-based line number
        line: usize,
        /// Offending line
        content: String,
    },

    /// The alias file could not be read
    #[error("cannot read alias file '{path}': {reason}\n  Suggestion: Check the path and file permissions")]
    ReadFile {
        /// File path
        path: String,
        /// I/O failure
        reason: String,
    },
}
