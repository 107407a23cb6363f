//! Resolve command handler: print the country of each affiliation segment.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use astro_biblio::country::{AffiliationResolver, ResolutionTally, affiliation_segments};
use tracing::info;

use super::build_resolver;
use crate::app_config::FileConfig;
use crate::cli::ResolveArgs;

pub async fn run_resolve_command(args: &ResolveArgs, config: &FileConfig) -> Result<()> {
    let affiliations = if !args.affiliations.is_empty() {
        args.affiliations.clone()
    } else if !io::stdin().is_terminal() {
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read affiliations from stdin")?
    } else {
        info!("No input provided. Pass affiliations as arguments or pipe them via stdin.");
        info!("Example: astro-biblio resolve 'Dept. of Physics, UK'");
        return Ok(());
    };

    let resolver = build_resolver(&args.data, config).await?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let tally = write_resolutions(&mut out, &resolver, &affiliations)?;
    out.flush()?;

    info!(
        total = tally.total(),
        unidentified = tally.unidentified(),
        "Resolution complete"
    );
    Ok(())
}

/// Writes one `segment<TAB>country<TAB>code` line per segment.
fn write_resolutions<W: Write>(
    out: &mut W,
    resolver: &AffiliationResolver,
    affiliations: &[String],
) -> Result<ResolutionTally> {
    let mut tally = ResolutionTally::new();
    for affiliation in affiliations {
        for segment in affiliation_segments(affiliation) {
            match tally.record_segment(resolver, segment) {
                Some(record) => writeln!(
                    out,
                    "{segment}\t{}\t{}",
                    record.canonical_name, record.alpha3_code
                )?,
                None => writeln!(out, "{segment}\tunidentified")?,
            }
        }
    }
    Ok(tally)
}
