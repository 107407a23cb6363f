//! Country resolution for free-text author affiliations.
//!
//! Country data is fetched once per run through a [`CountrySource`], then
//! combined with an [`AliasTable`] into an [`AffiliationResolver`]. The
//! resolver finds the first country name or alias in an affiliation and
//! [`ResolutionTally`] accumulates per-country counts.
//!
//! # Example
//!
//! ```no_run
//! use astro_biblio::country::{
//!     AffiliationResolver, AliasTable, RestCountriesSource, load_country_table,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = RestCountriesSource::new()?;
//! let table = load_country_table(&source).await?;
//! let resolver = AffiliationResolver::new(table, &AliasTable::builtin())?;
//!
//! let country = resolver.resolve("Dept. of Physics, UK");
//! assert_eq!(country.map(|c| c.canonical_name.as_str()), Some("United Kingdom"));
//! # Ok(())
//! # }
//! ```

mod alias;
mod error;
mod http_client;
mod matcher;
mod record;
mod resolver;
mod source;
mod tally;

pub use alias::{AliasTable, BUILTIN_ALIASES};
pub use error::{AliasError, CountryError};
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts, build_http_client,
};
pub use matcher::{PhraseHit, PhraseMatcher};
pub use record::{
    CANONICAL_RENAMES, Coordinates, CountryRecord, CountryTable, parse_countries_json,
};
pub use resolver::{AffiliationResolver, CountryMatch, affiliation_segments};
pub use source::{
    CountryFileSource, CountrySource, DEFAULT_COUNTRIES_URL, RestCountriesSource,
    load_country_table,
};
pub use tally::{ResolutionTally, tally_library};
