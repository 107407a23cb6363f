//! Affiliation country resolution.

use std::collections::HashMap;
use std::ops::Range;

use tracing::{debug, instrument, warn};

use super::matcher::PhraseMatcher;
use super::{AliasTable, CountryError, CountryRecord, CountryTable};

/// A recognized country in an affiliation, with the span that named it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryMatch<'a> {
    /// The resolved country.
    pub record: &'a CountryRecord,
    /// Text exactly as it appeared in the affiliation.
    pub matched_text: String,
    /// Byte range of `matched_text` in the affiliation.
    pub span: Range<usize>,
    /// True when `matched_text` was an alias rather than the canonical name.
    pub via_alias: bool,
}

/// Resolves free-text affiliations to countries.
///
/// Phrases are every canonical country name plus every alias whose target
/// exists in the table. Resolution is a read-only lookup: the same text
/// always yields the same country.
#[derive(Debug, Clone)]
pub struct AffiliationResolver {
    table: CountryTable,
    aliases: HashMap<String, String>,
    dropped_aliases: Vec<(String, String)>,
    matcher: PhraseMatcher,
}

impl AffiliationResolver {
    /// Builds a resolver from a country table and alias table.
    ///
    /// Names renamed while loading the table become aliases of their new
    /// canonical name. Aliases pointing at a country missing from the table
    /// are dropped with a warning and never match.
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Matcher`] if the phrase pattern cannot be compiled.
    #[instrument(skip_all, fields(countries = table.len(), aliases = aliases.len()))]
    pub fn new(table: CountryTable, aliases: &AliasTable) -> Result<Self, CountryError> {
        let mut alias_map = HashMap::new();
        let mut dropped_aliases = Vec::new();

        let renamed = table
            .renamed()
            .iter()
            .map(|(original, canonical)| (original.as_str(), canonical.as_str()));
        for (alias, canonical) in renamed.chain(aliases.iter()) {
            if !table.contains(canonical) {
                warn!(alias, canonical, "Alias target is not a known country; alias ignored");
                dropped_aliases.push((alias.to_string(), canonical.to_string()));
            } else if alias != canonical {
                alias_map.insert(alias.to_string(), canonical.to_string());
            }
        }

        let phrases = table
            .iter()
            .map(|record| record.canonical_name.as_str())
            .chain(alias_map.keys().map(String::as_str));
        let matcher = PhraseMatcher::new(phrases)?;
        debug!(phrases = matcher.phrase_count(), "Country phrase matcher ready");

        Ok(Self {
            table,
            aliases: alias_map,
            dropped_aliases,
            matcher,
        })
    }

    /// Finds the first country named in `text`, with its span.
    #[must_use]
    pub fn find_match(&self, text: &str) -> Option<CountryMatch<'_>> {
        let hit = self.matcher.find(text)?;
        let (canonical, via_alias) = match self.aliases.get(hit.phrase) {
            Some(canonical) => (canonical.as_str(), true),
            None => (hit.phrase, false),
        };
        let record = self.table.get(canonical)?;
        Some(CountryMatch {
            record,
            matched_text: hit.phrase.to_string(),
            span: hit.span,
            via_alias,
        })
    }

    /// Resolves `text` to the first country it names.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<&CountryRecord> {
        self.find_match(text).map(|m| m.record)
    }

    /// Country table backing this resolver.
    #[must_use]
    pub fn table(&self) -> &CountryTable {
        &self.table
    }

    /// Aliases that were ignored because their target is unknown.
    #[must_use]
    pub fn dropped_aliases(&self) -> &[(String, String)] {
        &self.dropped_aliases
    }
}

/// Splits an affiliation string into its `;`-separated, trimmed segments.
///
/// Segments that are empty after trimming are skipped.
pub fn affiliation_segments(affiliation: &str) -> impl Iterator<Item = &str> {
    affiliation
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::country::record::parse_countries_json;

    fn resolver() -> AffiliationResolver {
        let records = parse_countries_json(
            r#"[
                {"name": "Australia", "alpha3Code": "AUS"},
                {"name": "United Kingdom of Great Britain and Northern Ireland", "alpha3Code": "GBR"},
                {"name": "United States of America", "alpha3Code": "USA"},
                {"name": "Chile", "alpha3Code": "CHL"}
            ]"#,
            "test",
        )
        .unwrap();
        let table = CountryTable::from_records(records).unwrap();
        AffiliationResolver::new(table, &AliasTable::builtin()).unwrap()
    }

    #[test]
    fn test_resolve_canonical_name() {
        let r = resolver();
        let record = r
            .resolve("School of Physics, University of Melbourne, Melbourne, Australia")
            .unwrap();
        assert_eq!(record.canonical_name, "Australia");
        assert_eq!(record.alpha3_code, "AUS");
    }

    #[test]
    fn test_resolve_alias_substitutes_canonical_name() {
        let r = resolver();
        let m = r.find_match("Dept. of Physics, UK").unwrap();
        assert_eq!(m.record.canonical_name, "United Kingdom");
        assert_eq!(m.matched_text, "UK");
        assert!(m.via_alias);
    }

    #[test]
    fn test_resolve_renamed_long_name_maps_to_canonical() {
        let r = resolver();
        let record = r
            .resolve("Edinburgh, United Kingdom of Great Britain and Northern Ireland")
            .unwrap();
        assert_eq!(record.canonical_name, "United Kingdom");
    }

    #[test]
    fn test_resolve_unknown_returns_none() {
        let r = resolver();
        assert!(r.resolve("Max Planck Institute for Astronomy, Heidelberg").is_none());
    }

    #[test]
    fn test_unknown_alias_target_is_dropped() {
        let r = resolver();
        let dropped: Vec<_> = r.dropped_aliases().iter().map(|(a, _)| a.as_str()).collect();
        assert_eq!(dropped, vec!["NZ", "N.Z.", "N. Z."]);
        assert!(r.resolve("University of Auckland, NZ").is_none());
    }

    #[test]
    fn test_find_match_span_points_into_text() {
        let r = resolver();
        let text = "Cerro Tololo, La Serena, Chile";
        let m = r.find_match(text).unwrap();
        assert_eq!(&text[m.span.clone()], "Chile");
        assert!(!m.via_alias);
    }

    #[test]
    fn test_affiliation_segments_split_and_trim() {
        let segments: Vec<_> = affiliation_segments(" Monash, Australia ;ESO, Chile").collect();
        assert_eq!(segments, vec!["Monash, Australia", "ESO, Chile"]);
    }

    #[test]
    fn test_affiliation_segments_skip_empty() {
        let segments: Vec<_> = affiliation_segments("Monash, Australia; ;ESO, Chile;").collect();
        assert_eq!(segments, vec!["Monash, Australia", "ESO, Chile"]);
        assert_eq!(affiliation_segments(" ; ").count(), 0);
    }
}
