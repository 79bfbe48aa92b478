//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::error::AppError;
use crate::source::{SourceKind, get_source, registry::source_names};

/// Source used when neither the command line nor the config names one
const DEFAULT_SOURCE: SourceKind = SourceKind::Claude;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "codewrapped")]
#[command(
    about = "Year-in-review statistics for AI coding assistant sessions",
    version
)]
pub(crate) struct Cli {
    /// Data source: pi, claude (cc), codex (cx), opencode (oc)
    #[arg(value_name = "SOURCE")]
    pub(crate) source: Option<String>,

    /// Year to summarize (defaults to the current year)
    #[arg(short, long)]
    pub(crate) year: Option<i32>,

    /// Output as JSON
    #[arg(short, long)]
    pub(crate) json: bool,

    /// Timezone for dates and streaks (e.g., "Asia/Shanghai", "UTC", "America/New_York")
    #[arg(long, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Locale for number formatting (e.g., "en", "zh", "de")
    #[arg(long, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Read the selected source's logs from this directory
    #[arg(long, value_name = "DIR")]
    pub(crate) root: Option<PathBuf>,

    /// Color output mode
    #[arg(long, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long)]
    pub(crate) no_color: bool,

    /// Enable debug logging (show processing details)
    #[arg(long)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        // String options: only apply if CLI didn't set them
        if self.source.is_none() {
            self.source = config.source.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }

        self
    }

    pub(crate) fn source_kind(&self) -> Result<SourceKind, AppError> {
        match self.source.as_deref() {
            None => Ok(DEFAULT_SOURCE),
            Some(name) => get_source(name).ok_or_else(|| AppError::UnknownSource {
                input: name.to_string(),
                expected: source_names(),
            }),
        }
    }

    /// Requested year, or `current` when none was given
    pub(crate) fn target_year(&self, current: i32) -> Result<i32, AppError> {
        match self.year {
            None => Ok(current),
            Some(year) if (1970..=9999).contains(&year) => Ok(year),
            Some(year) => Err(AppError::InvalidYear { input: year }),
        }
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["codewrapped"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn parses_positional_source_and_flags() {
        let cli = parse(&["cx", "--year", "2024", "--json", "--timezone", "UTC"]);
        assert_eq!(cli.source.as_deref(), Some("cx"));
        assert_eq!(cli.year, Some(2024));
        assert!(cli.json);
        assert_eq!(cli.source_kind().unwrap(), SourceKind::Codex);
    }

    #[test]
    fn default_source_when_missing() {
        let cli = parse(&[]);
        assert_eq!(cli.source_kind().unwrap(), SourceKind::Claude);
    }

    #[test]
    fn unknown_source_is_error() {
        let cli = parse(&["copilot"]);
        let err = cli.source_kind().unwrap_err();
        assert!(err.to_string().contains("copilot"));
        assert!(err.to_string().contains("opencode"));
    }

    #[test]
    fn target_year_validation() {
        let cli = parse(&[]);
        assert_eq!(cli.target_year(2025).unwrap(), 2025);
        let cli = parse(&["--year", "2023"]);
        assert_eq!(cli.target_year(2025).unwrap(), 2023);
        let cli = parse(&["--year", "12"]);
        assert!(matches!(
            cli.target_year(2025),
            Err(AppError::InvalidYear { input: 12 })
        ));
    }

    #[test]
    fn config_fills_unset_options_only() {
        let config = Config {
            source: Some("opencode".to_string()),
            timezone: Some("Europe/Berlin".to_string()),
            locale: Some("de".to_string()),
            no_color: true,
            ..Config::default()
        };
        let cli = parse(&["pi", "--timezone", "UTC"]).with_config(&config);
        assert_eq!(cli.source.as_deref(), Some("pi"));
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
        assert_eq!(cli.locale.as_deref(), Some("de"));
        assert!(cli.no_color);
        assert!(!cli.use_color());
    }

    #[test]
    fn color_flags() {
        assert!(parse(&["--color", "always"]).use_color());
        assert!(!parse(&["--color", "never"]).use_color());
        assert!(!parse(&["--color", "always", "--no-color"]).use_color());
    }
}
