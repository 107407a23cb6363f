//! Articles-per-year histogram.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use tracing::debug;

use super::Library;

/// Years accepted into the histogram. Anything else is treated as bad data.
pub const PLAUSIBLE_YEARS: RangeInclusive<i32> = 1000..=9999;

/// Counts articles per publication year.
///
/// Every year between the earliest and latest is present, with 0 for
/// years without articles. Articles whose year does not parse or falls
/// outside [`PLAUSIBLE_YEARS`] are skipped.
#[must_use]
pub fn year_histogram(library: &Library) -> BTreeMap<i32, u64> {
    let mut histogram = BTreeMap::new();
    let mut skipped = 0_usize;
    for (bibcode, article) in library {
        match article.year() {
            Some(year) if PLAUSIBLE_YEARS.contains(&year) => {
                *histogram.entry(year).or_insert(0) += 1;
            }
            Some(year) => {
                debug!(%bibcode, year, "Year out of range; article skipped");
                skipped += 1;
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, "Articles without a usable year");
    }

    let bounds = histogram
        .keys()
        .next()
        .copied()
        .zip(histogram.keys().next_back().copied());
    if let Some((first, last)) = bounds {
        for year in first..=last {
            histogram.entry(year).or_insert(0);
        }
    }
    histogram
}
