//! Country records and the canonical-name keyed country table.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use super::CountryError;

/// Names from the country endpoint replaced by a shorter canonical name.
///
/// The original name stays reachable as an alias of the canonical one.
pub const CANONICAL_RENAMES: &[(&str, &str)] = &[(
    "United Kingdom of Great Britain and Northern Ireland",
    "United Kingdom",
)];

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single country as loaded from the country endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    /// Authoritative name used as the lookup key.
    pub canonical_name: String,
    /// ISO 3166-1 alpha-3 code.
    pub alpha3_code: String,
    /// Capital city; empty when the endpoint has none.
    pub capital: String,
    /// Representative coordinates, when provided.
    pub coordinates: Option<Coordinates>,
    /// Flag image URL; empty when the endpoint has none.
    pub flag: String,
    /// ISO 3166-1 numeric code, when provided.
    pub numeric_code: Option<String>,
}

/// Wire shape of one entry in the REST Countries v2 response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCountry {
    name: String,
    alpha3_code: String,
    #[serde(default)]
    capital: Option<String>,
    #[serde(default)]
    latlng: Option<Vec<f64>>,
    #[serde(default)]
    flag: Option<String>,
    #[serde(default)]
    numeric_code: Option<String>,
}

impl From<RawCountry> for CountryRecord {
    fn from(raw: RawCountry) -> Self {
        let coordinates = match raw.latlng.as_deref() {
            Some([latitude, longitude, ..]) => Some(Coordinates {
                latitude: *latitude,
                longitude: *longitude,
            }),
            _ => None,
        };
        Self {
            canonical_name: raw.name,
            alpha3_code: raw.alpha3_code,
            capital: raw.capital.unwrap_or_default(),
            coordinates,
            flag: raw.flag.unwrap_or_default(),
            numeric_code: raw.numeric_code,
        }
    }
}

/// Decodes a REST Countries v2 JSON array.
///
/// `origin` names the URL or file for error messages.
///
/// # Errors
///
/// Returns [`CountryError::Decode`] when the body is not a JSON array of
/// country objects, and [`CountryError::Empty`] when the array is empty.
pub fn parse_countries_json(body: &str, origin: &str) -> Result<Vec<CountryRecord>, CountryError> {
    let raw: Vec<RawCountry> =
        serde_json::from_str(body).map_err(|e| CountryError::decode(origin, &e.to_string()))?;
    if raw.is_empty() {
        return Err(CountryError::Empty {
            origin: origin.to_string(),
        });
    }
    debug!(origin, count = raw.len(), "Decoded country data");
    Ok(raw.into_iter().map(CountryRecord::from).collect())
}

/// Immutable table of countries keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    records: BTreeMap<String, CountryRecord>,
    renamed: Vec<(String, String)>,
}

impl CountryTable {
    /// Builds a table, applying [`CANONICAL_RENAMES`].
    ///
    /// A later record with the same canonical name replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Empty`] when `records` is empty.
    pub fn from_records(
        records: impl IntoIterator<Item = CountryRecord>,
    ) -> Result<Self, CountryError> {
        let mut table = Self::default();
        for mut record in records {
            if let Some((original, canonical)) = CANONICAL_RENAMES
                .iter()
                .find(|(original, _)| *original == record.canonical_name)
            {
                record.canonical_name = (*canonical).to_string();
                table
                    .renamed
                    .push(((*original).to_string(), (*canonical).to_string()));
            }
            if let Some(previous) = table
                .records
                .insert(record.canonical_name.clone(), record)
            {
                warn!(name = %previous.canonical_name, "Duplicate country name; keeping the later record");
            }
        }
        if table.records.is_empty() {
            return Err(CountryError::Empty {
                origin: "country table".to_string(),
            });
        }
        Ok(table)
    }

    /// Looks up a country by canonical name.
    #[must_use]
    pub fn get(&self, canonical_name: &str) -> Option<&CountryRecord> {
        self.records.get(canonical_name)
    }

    #[must_use]
    pub fn contains(&self, canonical_name: &str) -> bool {
        self.records.contains_key(canonical_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in canonical-name order.
    pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> {
        self.records.values()
    }

    /// `(original endpoint name, canonical name)` pairs applied at load.
    #[must_use]
    pub fn renamed(&self) -> &[(String, String)] {
        &self.renamed
    }
}
