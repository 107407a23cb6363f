//! Loading the library cache from disk.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, instrument, warn};

use super::Library;

/// Loads the library cache at `path`.
///
/// A missing file starts from an empty library. An unreadable or malformed
/// file is reported and also treated as empty.
#[must_use]
#[instrument]
pub fn load_library(path: &Path) -> Library {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("No library found; starting from an empty library");
            return Library::new();
        }
        Err(e) => {
            warn!(error = %e, "Cannot read library; starting from an empty library");
            return Library::new();
        }
    };

    match serde_json::from_str::<Library>(&raw) {
        Ok(library) => {
            info!(articles = library.len(), "Loaded library");
            library
        }
        Err(e) => {
            warn!(error = %e, "Malformed library; starting from an empty library");
            Library::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_library_reads_articles() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"2018PASA...35...10S": {{"year": "2018", "aff": ["ANU, Australia"]}}}}"#
        )
        .unwrap();

        let library = load_library(file.path());
        assert_eq!(library.len(), 1);
        assert_eq!(library["2018PASA...35...10S"].year(), Some(2018));
    }

    #[test]
    fn test_load_library_missing_file_is_empty() {
        let library = load_library(Path::new("/nonexistent/library.json"));
        assert!(library.is_empty());
    }

    #[test]
    fn test_load_library_malformed_file_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\u{80}\u{2} not json").unwrap();
        assert!(load_library(file.path()).is_empty());
    }

    #[test]
    fn test_load_library_wrong_shape_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"["2018PASA...35...10S"]"#).unwrap();
        assert!(load_library(file.path()).is_empty());
    }
}
