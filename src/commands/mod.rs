//! CLI command handlers and the settings they share.

mod countries;
mod resolve;
mod years;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use astro_biblio::country::{
    AffiliationResolver, AliasTable, CountryFileSource, CountrySource, DEFAULT_COUNTRIES_URL,
    HttpTimeouts, RestCountriesSource, load_country_table,
};
use tracing::{debug, warn};

use crate::app_config::{FileConfig, validate_countries_url};
use crate::cli::CountryDataArgs;

pub use countries::run_countries_command;
pub use resolve::run_resolve_command;
pub use years::run_years_command;

/// Library cache used when neither CLI nor config names one.
pub const DEFAULT_LIBRARY_PATH: &str = "library.json";

/// CLI value, then config value, then the default library path.
pub(crate) fn library_path(cli: Option<&Path>, config: &FileConfig) -> PathBuf {
    cli.map(Path::to_path_buf)
        .or_else(|| config.library_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_PATH))
}

/// CLI value, then `<config output_dir>/<file_name>`, then `./<file_name>`.
pub(crate) fn output_path(cli: Option<&Path>, config: &FileConfig, file_name: &str) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    config
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(file_name)
}

/// Picks the country source: CLI flags win over config, a file wins over a URL.
pub(crate) fn country_source(
    data: &CountryDataArgs,
    config: &FileConfig,
) -> Result<Box<dyn CountrySource>> {
    let (file, url) = if data.countries_file.is_some() || data.countries_url.is_some() {
        (data.countries_file.clone(), data.countries_url.clone())
    } else {
        (config.countries_file.clone(), config.countries_url.clone())
    };

    if let Some(path) = file {
        let source = CountryFileSource::new(path);
        debug!(path = %source.path().display(), "Using country file");
        return Ok(Box::new(source));
    }

    let url = url.unwrap_or_else(|| DEFAULT_COUNTRIES_URL.to_string());
    validate_countries_url(&url).with_context(|| format!("Invalid countries URL '{url}'"))?;
    let defaults = HttpTimeouts::default();
    let timeouts = HttpTimeouts {
        connect_timeout_secs: config
            .connect_timeout_secs
            .unwrap_or(defaults.connect_timeout_secs),
        read_timeout_secs: config
            .read_timeout_secs
            .unwrap_or(defaults.read_timeout_secs),
    };
    Ok(Box::new(RestCountriesSource::with_url(url, timeouts)?))
}

/// Built-in aliases plus the CLI (or else config) alias file.
pub(crate) fn alias_table(data: &CountryDataArgs, config: &FileConfig) -> Result<AliasTable> {
    let mut aliases = AliasTable::builtin();
    if let Some(path) = data.aliases_file.as_ref().or(config.aliases_file.as_ref()) {
        aliases.extend_from_file(path)?;
        debug!(path = %path.display(), aliases = aliases.len(), "Loaded alias file");
    }
    Ok(aliases)
}

/// Fetches country data and builds the resolver. Any failure here aborts the run.
pub(crate) async fn build_resolver(
    data: &CountryDataArgs,
    config: &FileConfig,
) -> Result<AffiliationResolver> {
    let aliases = alias_table(data, config)?;
    let source = country_source(data, config)?;
    let table = load_country_table(source.as_ref())
        .await
        .context("Country data is required to resolve affiliations")?;
    let resolver = AffiliationResolver::new(table, &aliases)?;
    if !resolver.dropped_aliases().is_empty() {
        warn!(
            dropped = resolver.dropped_aliases().len(),
            "Some aliases name unknown countries and will never match"
        );
    }
    Ok(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_path_priority() {
        let config = FileConfig {
            library_path: Some(PathBuf::from("from-config.json")),
            ..FileConfig::default()
        };
        assert_eq!(
            library_path(Some(Path::new("cli.json")), &config),
            PathBuf::from("cli.json")
        );
        assert_eq!(library_path(None, &config), PathBuf::from("from-config.json"));
        assert_eq!(
            library_path(None, &FileConfig::default()),
            PathBuf::from(DEFAULT_LIBRARY_PATH)
        );
    }

    #[test]
    fn test_output_path_uses_config_dir() {
        let config = FileConfig {
            output_dir: Some(PathBuf::from("reports")),
            ..FileConfig::default()
        };
        assert_eq!(
            output_path(None, &config, "years.csv"),
            PathBuf::from("reports/years.csv")
        );
        assert_eq!(
            output_path(Some(Path::new("x.csv")), &config, "years.csv"),
            PathBuf::from("x.csv")
        );
        assert_eq!(
            output_path(None, &FileConfig::default(), "years.csv"),
            PathBuf::from("./years.csv")
        );
    }

    #[test]
    fn test_country_source_cli_file_wins() {
        let data = CountryDataArgs {
            countries_file: Some(PathBuf::from("countries.json")),
            ..CountryDataArgs::default()
        };
        let config = FileConfig {
            countries_url: Some("https://example.com/all".to_string()),
            ..FileConfig::default()
        };
        let source = country_source(&data, &config).unwrap();
        assert_eq!(source.name(), "country-file");
    }

    #[test]
    fn test_country_source_cli_url_overrides_config_file() {
        let data = CountryDataArgs {
            countries_url: Some("https://example.com/all".to_string()),
            ..CountryDataArgs::default()
        };
        let config = FileConfig {
            countries_file: Some(PathBuf::from("countries.json")),
            ..FileConfig::default()
        };
        let source = country_source(&data, &config).unwrap();
        assert_eq!(source.name(), "rest-countries");
    }

    #[test]
    fn test_country_source_defaults_to_rest_endpoint() {
        let source = country_source(&CountryDataArgs::default(), &FileConfig::default()).unwrap();
        assert_eq!(source.name(), "rest-countries");
    }

    #[test]
    fn test_country_source_rejects_bad_url() {
        let data = CountryDataArgs {
            countries_url: Some("not a url".to_string()),
            ..CountryDataArgs::default()
        };
        assert!(country_source(&data, &FileConfig::default()).is_err());
    }

    #[test]
    fn test_alias_table_without_file_is_builtin() {
        let aliases = alias_table(&CountryDataArgs::default(), &FileConfig::default()).unwrap();
        assert_eq!(aliases, AliasTable::builtin());
    }
}
