use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output;

/// Progress bar over the eligible rows of a run.
///
/// Hidden in quiet mode. Clears itself when dropped.
pub struct RowProgress {
    progress_bar: ProgressBar,
}

impl RowProgress {
    #[allow(clippy::unwrap_used)]
    pub fn new(total: usize) -> Self {
        let progress_bar = if output::is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total as u64)
        };
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=> "),
        );
        progress_bar.enable_steady_tick(Duration::from_millis(80));

        Self { progress_bar }
    }

    /// Shows the cell written last.
    pub fn set_current(&self, message: impl Into<String>) {
        self.progress_bar.set_message(message.into());
    }

    pub fn advance(&self) {
        self.progress_bar.inc(1);
    }

    /// Prints a line above the bar without garbling it.
    pub fn println(&self, line: impl AsRef<str>) {
        if !output::is_quiet() {
            self.progress_bar.println(line);
        }
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Drop for RowProgress {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
