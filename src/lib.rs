//! Astro Biblio Core Library
//!
//! This library turns a cached library of astrophysics publications into
//! country and year summaries. Its core is the affiliation country
//! resolver, which finds the country named in a free-text author
//! affiliation using phrase matching over a fetched country list and a
//! small table of abbreviation aliases.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`country`] - Country records, aliases, phrase matching and resolution
//! - [`library`] - Cached bibliographic records and yearly histograms
//! - [`report`] - CSV summaries for choropleth and yearly plots

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod country;
pub mod library;
pub mod report;
mod user_agent;

// Re-export commonly used types
pub use country::{
    AffiliationResolver, AliasTable, CountryError, CountryFileSource, CountryMatch, CountryRecord,
    CountrySource, CountryTable, DEFAULT_COUNTRIES_URL, ResolutionTally, RestCountriesSource,
    tally_library,
};
pub use library::{Article, Library, load_library, year_histogram};
pub use report::{ReportError, write_country_counts, write_year_counts};
