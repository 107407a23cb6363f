//! Countries command handler: tally library affiliations per country.

use std::io::{self, IsTerminal};

use anyhow::Result;
use astro_biblio::report::COUNTRY_COUNTS_FILE;
use astro_biblio::{load_library, tally_library, write_country_counts};
use tracing::{debug, info};

use super::{build_resolver, library_path, output_path};
use crate::app_config::FileConfig;
use crate::cli::CountriesArgs;
use crate::progress::TallyProgress;

pub async fn run_countries_command(
    args: &CountriesArgs,
    config: &FileConfig,
    quiet: bool,
) -> Result<()> {
    // Fetch first: a country-data failure must abort before any output is written.
    let resolver = build_resolver(&args.data, config).await?;

    let library = load_library(&library_path(args.library.as_deref(), config));
    let output = output_path(args.output.as_deref(), config, COUNTRY_COUNTS_FILE);

    let show_progress = !quiet && !args.no_progress && io::stderr().is_terminal();
    let progress = TallyProgress::new(show_progress, library.len());
    debug!(progress = progress.is_enabled(), articles = library.len(), "Tallying affiliations");
    let tally = tally_library(&resolver, &library, |tally| progress.article_done(tally));
    progress.finish();

    write_country_counts(&output, resolver.table(), &tally)?;

    info!(
        articles = library.len(),
        affiliations = tally.total(),
        identified = tally.identified(),
        unidentified = tally.unidentified(),
        unidentified_fraction = tally.unidentified_fraction(),
        countries = tally.counts().len(),
        output = %output.display(),
        "Country tally complete"
    );
    Ok(())
}
