//! Years command handler: articles per publication year.

use anyhow::Result;
use astro_biblio::report::YEAR_COUNTS_FILE;
use astro_biblio::{load_library, write_year_counts, year_histogram};
use tracing::info;

use super::{library_path, output_path};
use crate::app_config::FileConfig;
use crate::cli::YearsArgs;

pub fn run_years_command(args: &YearsArgs, config: &FileConfig) -> Result<()> {
    let library = load_library(&library_path(args.library.as_deref(), config));
    let histogram = year_histogram(&library);
    let output = output_path(args.output.as_deref(), config, YEAR_COUNTS_FILE);
    write_year_counts(&output, &histogram)?;

    info!(
        articles = library.len(),
        first_year = histogram.keys().next().copied(),
        last_year = histogram.keys().next_back().copied(),
        output = %output.display(),
        "Year histogram complete"
    );
    Ok(())
}
