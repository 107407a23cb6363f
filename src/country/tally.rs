//! Per-country counting of resolved affiliations.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::CountryRecord;
use super::resolver::{AffiliationResolver, affiliation_segments};
use crate::library::Library;

/// Running counts of resolved and unidentified affiliation segments.
///
/// `counts` sums to `total - unidentified`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionTally {
    total: u64,
    unidentified: u64,
    counts: BTreeMap<String, u64>,
}

impl ResolutionTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every non-empty `;`-separated segment of `affiliation` and
    /// counts it.
    ///
    /// Returns how many segments were identified.
    pub fn record_affiliation(&mut self, resolver: &AffiliationResolver, affiliation: &str) -> usize {
        affiliation_segments(affiliation)
            .filter(|segment| self.record_segment(resolver, segment).is_some())
            .count()
    }

    /// Resolves a single segment, counts it and returns the country found.
    pub fn record_segment<'r>(
        &mut self,
        resolver: &'r AffiliationResolver,
        segment: &str,
    ) -> Option<&'r CountryRecord> {
        self.total += 1;
        let resolved = resolver.resolve(segment);
        match resolved {
            Some(record) => *self.counts.entry(record.canonical_name.clone()).or_insert(0) += 1,
            None => self.unidentified += 1,
        }
        resolved
    }

    /// Segments seen.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Segments with no recognized country.
    #[must_use]
    pub fn unidentified(&self) -> u64 {
        self.unidentified
    }

    /// Segments with a recognized country.
    #[must_use]
    pub fn identified(&self) -> u64 {
        self.total - self.unidentified
    }

    /// Count per canonical country name.
    #[must_use]
    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// `unidentified / total`, or 0 before anything was recorded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn unidentified_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.unidentified as f64 / self.total as f64
        }
    }

    /// `1 - unidentified / total`, or 0 before anything was recorded.
    #[must_use]
    pub fn identified_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            1.0 - self.unidentified_fraction()
        }
    }
}

/// Tallies every affiliation of every article in bibcode order.
///
/// `on_article` runs after each article with the tally so far, which lets
/// callers drive a progress display.
#[instrument(skip_all, fields(articles = library.len()))]
pub fn tally_library<F>(
    resolver: &AffiliationResolver,
    library: &Library,
    mut on_article: F,
) -> ResolutionTally
where
    F: FnMut(&ResolutionTally),
{
    let mut tally = ResolutionTally::new();
    for (bibcode, article) in library {
        for affiliation in &article.aff {
            tally.record_affiliation(resolver, affiliation);
        }
        debug!(%bibcode, total = tally.total(), "Article tallied");
        on_article(&tally);
    }
    tally
}
