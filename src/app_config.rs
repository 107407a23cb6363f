//! Application configuration loading for CLI defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use url::Url;

/// TOML-style file configuration for astro-biblio defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default library cache path.
    pub library_path: Option<PathBuf>,
    /// Default directory for CSV reports.
    pub output_dir: Option<PathBuf>,
    /// Country endpoint (REST Countries v2 compatible).
    pub countries_url: Option<String>,
    /// Saved country JSON used instead of the endpoint.
    pub countries_file: Option<PathBuf>,
    /// Extra `alias = Canonical Name` definitions.
    pub aliases_file: Option<PathBuf>,
    /// Country client connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Country client read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = self.countries_url.as_deref() {
            validate_countries_url(url)
                .with_context(|| format!("Invalid config value for `countries_url`: {url}"))?;
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

/// Checks that `raw` is an absolute http(s) URL.
pub fn validate_countries_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw).context("Expected an absolute URL")?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Expected an http:// or https:// URL, got scheme '{}'", url.scheme());
    }
    Ok(())
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

const CONFIG_DIR_NAME: &str = "astro-biblio";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config file location.
///
/// `$XDG_CONFIG_HOME/astro-biblio/config.toml`, else
/// `$HOME/.config/astro-biblio/config.toml`. Empty variables count as unset.
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    non_empty_env("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty_env("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|base| base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn non_empty_env(name: &str) -> Option<OsString> {
    env::var_os(name).filter(|value| !value.is_empty())
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_number = line_index + 1;
        let invalid = || format!("Invalid `{key}` value on line {line_number}");

        match key {
            "library_path" => {
                cfg.library_path = Some(unquote(value).with_context(invalid)?.into());
            }
            "output_dir" => {
                cfg.output_dir = Some(unquote(value).with_context(invalid)?.into());
            }
            "countries_url" => {
                cfg.countries_url = Some(unquote(value).with_context(invalid)?);
            }
            "countries_file" => {
                cfg.countries_file =
                    Some(unquote(value).with_context(invalid)?.into());
            }
            "aliases_file" => {
                cfg.aliases_file = Some(unquote(value).with_context(invalid)?.into());
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_secs(value).with_context(invalid)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(parse_secs(value).with_context(invalid)?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Drops a trailing `# comment`, leaving `#` inside quoted values alone.
fn strip_inline_comment(line: &str) -> &str {
    let mut quoted = false;
    let comment_start = line.char_indices().find_map(|(index, ch)| {
        if ch == '"' {
            quoted = !quoted;
        }
        (ch == '#' && !quoted).then_some(index)
    });
    comment_start.map_or(line, |index| &line[..index])
}

fn unquote(value: &str) -> Result<String> {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
        .context("Expected double-quoted string")
}

fn parse_secs(value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .context("Expected a whole number of seconds")
}
