//! Progress bar for library tallying.

use indicatif::{ProgressBar, ProgressStyle};

use astro_biblio::ResolutionTally;

/// Per-article progress bar showing the identified-country fraction.
///
/// When disabled every call is a no-op.
pub(crate) struct TallyProgress {
    bar: Option<ProgressBar>,
}

impl TallyProgress {
    pub(crate) fn new(enabled: bool, total_articles: usize) -> Self {
        if !enabled {
            return Self { bar: None };
        }
        let bar = ProgressBar::new(u64::try_from(total_articles).unwrap_or(u64::MAX));
        bar.set_style(
            ProgressStyle::with_template("{msg} {wide_bar} {pos}/{len} [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar: Some(bar) }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.bar.is_some()
    }

    /// Advances by one article and refreshes the fraction message.
    pub(crate) fn article_done(&self, tally: &ResolutionTally) {
        if let Some(bar) = &self.bar {
            bar.set_message(fraction_message(tally));
            bar.inc(1);
        }
    }

    pub(crate) fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

pub(crate) fn fraction_message(tally: &ResolutionTally) -> String {
    format!(
        "Fraction of affiliations with identified countries: {:.2}",
        tally.identified_fraction()
    )
}
