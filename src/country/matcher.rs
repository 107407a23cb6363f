//! Phrase matching over free text.
//!
//! Phrases match exactly and case-sensitively, only where the characters
//! on both sides of the phrase are not word characters (or the phrase
//! touches the edge of the text). When several phrases could match, the
//! one starting earliest wins; among phrases starting at the same
//! position, the longest wins.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use super::CountryError;

/// Compiled pattern size limit; the full country list plus aliases fits well inside.
const REGEX_SIZE_LIMIT: usize = 64 * (1 << 20);

/// A phrase occurrence in some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseHit<'t> {
    /// Matched phrase, borrowed from the scanned text.
    pub phrase: &'t str,
    /// Byte range of the phrase in the scanned text.
    pub span: Range<usize>,
}

/// Leftmost-longest phrase matcher.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    pattern: Option<Regex>,
    phrase_count: usize,
}

impl PhraseMatcher {
    /// Compiles a matcher for `phrases`. Duplicates and empty phrases are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Matcher`] when the pattern cannot be compiled.
    pub fn new<I, S>(phrases: I) -> Result<Self, CountryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        // Longest first so the alternation prefers it at a shared start position.
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        phrases.dedup();

        if phrases.is_empty() {
            return Ok(Self {
                pattern: None,
                phrase_count: 0,
            });
        }

        let alternation = phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"(?:^|\W)({alternation})(?:\W|$)");
        let pattern = RegexBuilder::new(&source)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| CountryError::Matcher {
                reason: e.to_string(),
            })?;

        Ok(Self {
            pattern: Some(pattern),
            phrase_count: phrases.len(),
        })
    }

    /// Finds the first phrase in `text`.
    #[must_use]
    pub fn find<'t>(&self, text: &'t str) -> Option<PhraseHit<'t>> {
        let captures = self.pattern.as_ref()?.captures(text)?;
        let phrase = captures.get(1)?;
        Some(PhraseHit {
            phrase: phrase.as_str(),
            span: phrase.range(),
        })
    }

    /// Number of distinct phrases compiled into the matcher.
    #[must_use]
    pub fn phrase_count(&self) -> usize {
        self.phrase_count
    }
}
