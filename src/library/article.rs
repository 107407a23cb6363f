//! Bibliographic record as stored in the library cache.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// One article in the library, keyed by bibcode in [`super::Library`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Publication year as stored by the literature database (usually `"2016"`).
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    /// One entry per author; each may hold several `;`-separated affiliations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub aff: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Vec<String>,
    /// Bibcodes of citing articles.
    #[serde(default, deserialize_with = "bibcode_set")]
    pub citation: BTreeSet<String>,
    /// Bibcodes of referenced articles.
    #[serde(default, deserialize_with = "bibcode_set")]
    pub reference: BTreeSet<String>,
}

impl Article {
    /// Year as an integer, when it parses.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.year.as_deref()?.trim().parse().ok()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Year>::deserialize(deserializer)?.map(|year| match year {
        Year::Text(text) => text,
        Year::Number(number) => number.to_string(),
    }))
}

/// Accepts a list of bibcodes, a map keyed by bibcode, or null.
fn bibcode_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct BibcodeSetVisitor;

    impl<'de> Visitor<'de> for BibcodeSetVisitor {
        type Value = BTreeSet<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list of bibcodes or a map keyed by bibcode")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(BTreeSet::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(BTreeSet::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, deserializer: D2) -> Result<Self::Value, D2::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut set = BTreeSet::new();
            while let Some(bibcode) = seq.next_element::<String>()? {
                set.insert(bibcode);
            }
            Ok(set)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut set = BTreeSet::new();
            while let Some((bibcode, _)) = map.next_entry::<String, de::IgnoredAny>()? {
                set.insert(bibcode);
            }
            Ok(set)
        }
    }

    deserializer.deserialize_any(BibcodeSetVisitor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let article: Article = serde_json::from_str(
            r#"{
                "year": "2016",
                "aff": ["Monash University, Australia; ESO, Chile"],
                "author": ["Casey, A. R."],
                "citation": {"2017ApJ...840...59C": {}},
                "reference": ["2009ApJ...692.1432F"]
            }"#,
        )
        .unwrap();
        assert_eq!(article.year(), Some(2016));
        assert_eq!(article.aff.len(), 1);
        assert!(article.citation.contains("2017ApJ...840...59C"));
        assert!(article.reference.contains("2009ApJ...692.1432F"));
    }

    #[test]
    fn test_deserialize_numeric_year_and_nulls() {
        let article: Article = serde_json::from_str(
            r#"{"year": 2001, "aff": null, "citation": null, "reference": null}"#,
        )
        .unwrap();
        assert_eq!(article.year.as_deref(), Some("2001"));
        assert!(article.aff.is_empty());
        assert!(article.citation.is_empty());
        assert!(article.reference.is_empty());
    }

    #[test]
    fn test_deserialize_missing_fields_defaults() {
        let article: Article = serde_json::from_str("{}").unwrap();
        assert_eq!(article, Article::default());
        assert_eq!(article.year(), None);
    }

    #[test]
    fn test_year_unparseable_is_none() {
        let article = Article {
            year: Some("in press".to_string()),
            ..Article::default()
        };
        assert_eq!(article.year(), None);
    }
}
