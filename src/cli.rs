//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Country and year summaries for a cached astrophysics publication library.
///
/// Resolves the country of every author affiliation in the library and
/// writes CSV data for choropleth and yearly plots.
#[derive(Parser, Debug)]
#[command(name = "astro-biblio")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count affiliations per country and write choropleth CSV data
    Countries(CountriesArgs),
    /// Resolve affiliation strings given as arguments or on stdin
    Resolve(ResolveArgs),
    /// Count articles per publication year
    Years(YearsArgs),
}

/// Where country data and aliases come from.
#[derive(Args, Debug, Clone, Default)]
pub struct CountryDataArgs {
    /// Country endpoint (REST Countries v2 compatible)
    #[arg(long, value_name = "URL")]
    pub countries_url: Option<String>,

    /// Read countries from a saved JSON file instead of the endpoint
    #[arg(long, value_name = "PATH", conflicts_with = "countries_url")]
    pub countries_file: Option<PathBuf>,

    /// Extra `alias = Canonical Name` definitions
    #[arg(long, value_name = "PATH")]
    pub aliases_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CountriesArgs {
    /// Library cache (JSON object of bibcode to article)
    #[arg(short = 'L', long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Output CSV path (default: <output_dir>/chronopleth_data.csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub data: CountryDataArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Affiliation strings; read one per line from stdin when omitted
    pub affiliations: Vec<String>,

    #[command(flatten)]
    pub data: CountryDataArgs,
}

#[derive(Args, Debug, Clone)]
pub struct YearsArgs {
    /// Library cache (JSON object of bibcode to article)
    #[arg(short = 'L', long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// Output CSV path (default: <output_dir>/papers_by_year.csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_countries_defaults() {
        let cli = Cli::try_parse_from(["astro-biblio", "countries"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        let Command::Countries(args) = cli.command else {
            panic!("expected countries subcommand");
        };
        assert!(args.library.is_none());
        assert!(args.output.is_none());
        assert!(!args.no_progress);
        assert!(args.data.countries_url.is_none());
    }

    #[test]
    fn test_cli_verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["astro-biblio", "years", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["astro-biblio", "-v", "years"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_cli_quiet_flag() {
        let cli = Cli::try_parse_from(["astro-biblio", "-q", "years"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_countries_all_flags() {
        let cli = Cli::try_parse_from([
            "astro-biblio",
            "countries",
            "-L",
            "library.json",
            "-o",
            "out.csv",
            "--no-progress",
            "--countries-file",
            "countries.json",
            "--aliases-file",
            "aliases.txt",
        ])
        .unwrap();
        let Command::Countries(args) = cli.command else {
            panic!("expected countries subcommand");
        };
        assert_eq!(args.library, Some(PathBuf::from("library.json")));
        assert_eq!(args.output, Some(PathBuf::from("out.csv")));
        assert!(args.no_progress);
        assert_eq!(args.data.countries_file, Some(PathBuf::from("countries.json")));
        assert_eq!(args.data.aliases_file, Some(PathBuf::from("aliases.txt")));
    }

    #[test]
    fn test_cli_countries_url_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "astro-biblio",
            "countries",
            "--countries-url",
            "https://example.com/all",
            "--countries-file",
            "countries.json",
        ]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_cli_resolve_collects_positional_affiliations() {
        let cli = Cli::try_parse_from([
            "astro-biblio",
            "resolve",
            "Dept. of Physics, UK",
            "ANU, Australia",
        ])
        .unwrap();
        let Command::Resolve(args) = cli.command else {
            panic!("expected resolve subcommand");
        };
        assert_eq!(args.affiliations, vec!["Dept. of Physics, UK", "ANU, Australia"]);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = Cli::try_parse_from(["astro-biblio"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Cli::try_parse_from(["astro-biblio", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Cli::try_parse_from(["astro-biblio", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Cli::try_parse_from(["astro-biblio", "years", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
