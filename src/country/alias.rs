//! Hand-maintained abbreviation aliases for country names.

use std::path::Path;

use tracing::{debug, instrument};

use super::AliasError;

/// Built-in `(alias, canonical name)` pairs.
pub const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("United Kingdom", "United Kingdom"),
    ("UK", "United Kingdom"),
    ("U.K.", "United Kingdom"),
    ("U. K.", "United Kingdom"),
    ("USA", "United States of America"),
    ("U.S.A.", "United States of America"),
    ("U. S. A.", "United States of America"),
    ("NZ", "New Zealand"),
    ("N.Z.", "New Zealand"),
    ("N. Z.", "New Zealand"),
];

/// Ordered set of `(alias text, canonical name)` pairs.
///
/// Several aliases may point at the same canonical name. Insertion order
/// is kept; re-adding an alias replaces its target in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// Creates an empty alias table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a table holding [`BUILTIN_ALIASES`].
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (alias, canonical) in BUILTIN_ALIASES {
            table.insert(*alias, *canonical);
        }
        table
    }

    /// Adds or retargets an alias.
    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        let alias = alias.into();
        let canonical = canonical.into();
        if let Some(entry) = self.entries.iter_mut().find(|(a, _)| *a == alias) {
            entry.1 = canonical;
        } else {
            self.entries.push((alias, canonical));
        }
    }

    /// Parses `alias = Canonical Name` lines and adds them.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::InvalidLine`] for a line without `=` or with an
    /// empty side. Entries before the bad line are kept.
    pub fn extend_from_str(&mut self, raw: &str) -> Result<(), AliasError> {
        for (index, raw_line) in raw.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let invalid = || AliasError::InvalidLine {
                line: index + 1,
                content: line.to_string(),
            };
            let (alias, canonical) = line.split_once('=').ok_or_else(invalid)?;
            let (alias, canonical) = (alias.trim(), canonical.trim());
            if alias.is_empty() || canonical.is_empty() {
                return Err(invalid());
            }
            if let Some(previous) = self.canonical_for(alias).filter(|p| *p != canonical) {
                debug!(alias, previous, canonical, "Alias retargeted");
            }
            self.insert(alias, canonical);
        }
        Ok(())
    }

    /// Reads an alias file and adds its entries.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError`] when the file cannot be read or a line is invalid.
    #[instrument(skip(self))]
    pub fn extend_from_file(&mut self, path: &Path) -> Result<(), AliasError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AliasError::ReadFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.extend_from_str(&raw)
    }

    /// Canonical name for `alias`, if registered.
    #[must_use]
    pub fn canonical_for(&self, alias: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, canonical)| canonical.as_str())
    }

    /// Iterates `(alias, canonical)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
