use anyhow::Result;
use std::fmt;

use super::pacing::Pacer;
use crate::translation::{TranslationError, TranslationRequest, Translator};

/// Prefix written into the output cell when a row fails.
pub const ERROR_MARKER_PREFIX: &str = "ERROR: ";

/// One selected row, already read out of the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowInput {
    /// Position within the selection, starting at 0.
    pub index: usize,
    pub word: String,
    pub context: String,
}

impl RowInput {
    pub fn is_eligible(&self) -> bool {
        !self.word.trim().is_empty()
    }
}

/// Everything the batch loop needs, with no reference to the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub source_language: String,
    pub target_language: String,
    pub rows: Vec<RowInput>,
}

impl BatchJob {
    pub fn eligible_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_eligible()).count()
    }
}

/// Result of one attempted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub index: usize,
    pub result: Result<String, TranslationError>,
}

impl RowOutcome {
    /// Text to write into the output cell.
    pub fn cell_text(&self) -> String {
        match &self.result {
            Ok(translation) => translation.clone(),
            Err(err) => format!("{ERROR_MARKER_PREFIX}{err}"),
        }
    }
}

/// Counts reported once the loop finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub translated_count: usize,
    pub total_eligible: usize,
    pub failed_count: usize,
}

impl RunReport {
    pub const fn new(total_eligible: usize) -> Self {
        Self {
            translated_count: 0,
            total_eligible,
            failed_count: 0,
        }
    }

    /// Short form, e.g. `2 of 3`.
    pub fn summary(&self) -> String {
        format!("{} of {}", self.translated_count, self.total_eligible)
    }

    pub const fn all_translated(&self) -> bool {
        self.translated_count == self.total_eligible
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Translation complete! Translated {} words.",
            self.summary()
        )
    }
}

/// Translates every eligible row of `job`, strictly in order.
///
/// Blank words are skipped without a request or a callback. Every other row
/// gets exactly one translator call, then `on_row` (the write hook), then a
/// pacer pause. A failed row never stops the loop; only an error returned
/// by `on_row` does.
pub async fn run_batch<F>(
    job: &BatchJob,
    translator: &dyn Translator,
    pacer: &mut dyn Pacer,
    mut on_row: F,
) -> Result<RunReport>
where
    F: FnMut(&RowOutcome) -> Result<()>,
{
    let mut report = RunReport::new(job.eligible_count());

    for row in &job.rows {
        if !row.is_eligible() {
            tracing::trace!(index = row.index, "skipping blank word");
            continue;
        }

        let request = TranslationRequest {
            word: row.word.clone(),
            source_language: job.source_language.clone(),
            target_language: job.target_language.clone(),
            context: row.context.clone(),
        };

        let outcome = RowOutcome {
            index: row.index,
            result: translator.translate(&request).await,
        };

        on_row(&outcome)?;

        match &outcome.result {
            Ok(translation) => {
                report.translated_count += 1;
                tracing::debug!(index = row.index, word = %row.word, %translation, "translated");
            }
            Err(err) => {
                report.failed_count += 1;
                tracing::warn!(
                    index = row.index,
                    word = %row.word,
                    status = ?err.status(),
                    error = %err,
                    "translation failed"
                );
            }
        }

        pacer.pause().await;
    }

    Ok(report)
}
