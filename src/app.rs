use std::io::{self, Write};

use chrono::{Datelike, Utc};
use tracing::debug;

use crate::catalog::BuiltinCatalog;
use crate::cli::Cli;
use crate::config::Config;
use crate::core::{StatsContext, compute_wrapped};
use crate::error::AppError;
use crate::output::{NumberFormat, SummaryOptions, output_wrapped_json, render_summary};
use crate::source::collect;
use crate::utils::Timezone;

/// Collect one source and print its yearly summary
pub(crate) fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let kind = cli.source_kind()?;
    let now = Utc::now();
    let year = cli.target_year(timezone.today(now).year())?;

    let roots = match &cli.root {
        Some(root) => config.source_roots().with_root(kind, root.clone()),
        None => config.source_roots(),
    };
    debug!(source = %kind, year, root = ?roots.root(kind), "resolved source");

    // Unfiltered pass feeds the first session and the current streak
    let (lifetime, collected) = rayon::join(
        || collect(kind, &roots, None, timezone),
        || collect(kind, &roots, Some(year), timezone),
    );

    let catalog = BuiltinCatalog;
    let ctx = StatsContext {
        year,
        source: kind,
        timezone,
        now,
        catalog: &catalog,
    };
    let stats = compute_wrapped(&ctx, &lifetime, &collected);

    let mut stdout = io::stdout().lock();
    if cli.json {
        writeln!(stdout, "{}", output_wrapped_json(&stats)?)?;
    } else if !stats.has_activity() {
        writeln!(
            stdout,
            "No {} activity found for {}.",
            kind.display_name(),
            year
        )?;
    } else {
        let text = render_summary(
            &stats,
            SummaryOptions {
                use_color: cli.use_color(),
                number_format,
            },
        );
        write!(stdout, "{text}")?;
    }
    Ok(())
}
