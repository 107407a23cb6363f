//! Sources of country data: the REST Countries endpoint or a saved JSON file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::http_client::{HttpTimeouts, build_http_client};
use super::record::parse_countries_json;
use super::{CountryError, CountryRecord, CountryTable};

/// Default REST Countries v2 endpoint, restricted to the fields we use.
pub const DEFAULT_COUNTRIES_URL: &str =
    "https://restcountries.com/v2/all?fields=name,alpha3Code,capital,latlng,flag,numericCode";

/// Provides the full list of countries once per run.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &str;

    /// Fetches every country record.
    ///
    /// # Errors
    ///
    /// Returns [`CountryError`] when the data cannot be obtained or decoded.
    async fn fetch(&self) -> Result<Vec<CountryRecord>, CountryError>;
}

/// Fetches countries over HTTP from a REST Countries v2 compatible endpoint.
pub struct RestCountriesSource {
    client: Client,
    url: String,
}

impl RestCountriesSource {
    /// Creates a source for [`DEFAULT_COUNTRIES_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Client`] if HTTP client construction fails.
    pub fn new() -> Result<Self, CountryError> {
        Self::with_url(DEFAULT_COUNTRIES_URL, HttpTimeouts::default())
    }

    /// Creates a source for a custom endpoint (also used for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Client`] if HTTP client construction fails.
    pub fn with_url(url: impl Into<String>, timeouts: HttpTimeouts) -> Result<Self, CountryError> {
        Ok(Self {
            client: build_http_client(timeouts)?,
            url: url.into(),
        })
    }
}

impl std::fmt::Debug for RestCountriesSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestCountriesSource")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "rest-countries"
    }

    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Vec<CountryRecord>, CountryError> {
        debug!("Requesting country list");
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!(error = %e, "Country request failed");
            CountryError::fetch_failed(&self.url, &e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CountryError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CountryError::fetch_failed(&self.url, &e.to_string()))?;
        parse_countries_json(&body, &self.url)
    }
}

/// Reads countries from a local JSON file in REST Countries v2 format.
#[derive(Debug, Clone)]
pub struct CountryFileSource {
    path: PathBuf,
}

impl CountryFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CountrySource for CountryFileSource {
    fn name(&self) -> &str {
        "country-file"
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Vec<CountryRecord>, CountryError> {
        let origin = self.path.display().to_string();
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CountryError::read_file(&origin, &e.to_string()))?;
        parse_countries_json(&body, &origin)
    }
}

/// Fetches countries from `source` and builds the country table.
///
/// # Errors
///
/// Returns [`CountryError`] if the source fails or yields no countries.
pub async fn load_country_table(source: &dyn CountrySource) -> Result<CountryTable, CountryError> {
    let records = source.fetch().await?;
    let table = CountryTable::from_records(records)?;
    info!(source = source.name(), countries = table.len(), "Loaded country data");
    Ok(table)
}
