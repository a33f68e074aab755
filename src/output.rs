//! Terminal output routing for a run.
//!
//! Only the completion report is written to stdout. Status lines, the
//! progress bar, warnings and diagnostic logs all go to stderr, so
//! `sheet-tl words.csv -r C2:C9 > report.txt` captures just the report.
//! `--quiet` hides status lines and the progress bar but never warnings or
//! errors.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Hide status lines and the progress bar.
    pub quiet: bool,
    pub no_color: bool,
    /// Log each request and row result.
    pub verbose: bool,
}

impl OutputConfig {
    /// Builds the config from CLI flags. A non-empty `NO_COLOR`
    /// (https://no-color.org/) also disables colors.
    pub fn from_flags(quiet: bool, no_color: bool, verbose: bool) -> Self {
        Self {
            quiet,
            no_color: no_color || no_color_env(),
            verbose,
        }
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub const fn default_log_directive(&self) -> &'static str {
        if self.verbose {
            "sheet_tl=debug"
        } else {
            "sheet_tl=error"
        }
    }
}

fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

/// Installs the global output config and the stderr log subscriber.
///
/// Only the first call has any effect.
pub fn init(config: OutputConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!config.no_color)
        .with_target(false)
        .try_init();

    let _ = OUTPUT_CONFIG.set(config);
}

pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(|| OutputConfig::from_flags(false, false, false))
}

pub fn is_quiet() -> bool {
    config().quiet
}

pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status line to stderr unless `--quiet` is set.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a warning to stderr, even with `--quiet`.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_log_level() {
        let quiet = OutputConfig::from_flags(true, true, false);
        let verbose = OutputConfig::from_flags(false, true, true);

        assert_eq!(quiet.default_log_directive(), "sheet_tl=error");
        assert_eq!(verbose.default_log_directive(), "sheet_tl=debug");
    }

    #[test]
    fn test_no_color_flag_always_wins() {
        let config = OutputConfig::from_flags(false, true, false);
        assert!(config.no_color);
        assert!(!config.quiet);
    }
}
