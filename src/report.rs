//! CSV summaries consumed by the choropleth and yearly plots.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::country::{CountryTable, ResolutionTally};

/// Default file name for per-country counts.
pub const COUNTRY_COUNTS_FILE: &str = "chronopleth_data.csv";
/// Default file name for per-year counts.
pub const YEAR_COUNTS_FILE: &str = "papers_by_year.csv";

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output file could not be created
    #[error("cannot create report '{path}': {source}\n  Suggestion: Check that the output directory exists and is writable")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing CSV rows failed
    #[error("cannot write report '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Writes `name,code,number` rows, one per country with a non-zero count.
///
/// Rows are sorted by country name. `code` is the alpha-3 code.
///
/// # Errors
///
/// Returns [`csv::Error`] when a row cannot be written.
pub fn write_country_counts_to<W: Write>(
    writer: W,
    table: &CountryTable,
    tally: &ResolutionTally,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["name", "code", "number"])?;
    for (name, number) in tally.counts() {
        if *number == 0 {
            continue;
        }
        let code = match table.get(name) {
            Some(record) => record.alpha3_code.as_str(),
            None => {
                warn!(%name, "Counted country missing from table; writing empty code");
                ""
            }
        };
        let number = number.to_string();
        csv_writer.write_record([name.as_str(), code, number.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `year,number` rows in year order.
///
/// # Errors
///
/// Returns [`csv::Error`] when a row cannot be written.
pub fn write_year_counts_to<W: Write>(
    writer: W,
    histogram: &BTreeMap<i32, u64>,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["year", "number"])?;
    for (year, number) in histogram {
        csv_writer.write_record([year.to_string(), number.to_string()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the per-country CSV to `path`.
///
/// # Errors
///
/// Returns [`ReportError`] when the file cannot be created or written.
#[instrument(skip(table, tally), fields(countries = tally.counts().len()))]
pub fn write_country_counts(
    path: &Path,
    table: &CountryTable,
    tally: &ResolutionTally,
) -> Result<(), ReportError> {
    let file = create(path)?;
    write_country_counts_to(file, table, tally).map_err(|source| ReportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!("Wrote country counts");
    Ok(())
}

/// Writes the per-year CSV to `path`.
///
/// # Errors
///
/// Returns [`ReportError`] when the file cannot be created or written.
#[instrument(skip(histogram), fields(years = histogram.len()))]
pub fn write_year_counts(path: &Path, histogram: &BTreeMap<i32, u64>) -> Result<(), ReportError> {
    let file = create(path)?;
    write_year_counts_to(file, histogram).map_err(|source| ReportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!("Wrote year counts");
    Ok(())
}

fn create(path: &Path) -> Result<std::fs::File, ReportError> {
    std::fs::File::create(path).map_err(|source| ReportError::Create {
        path: path.display().to_string(),
        source,
    })
}
