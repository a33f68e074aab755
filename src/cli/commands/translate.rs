//! Sheet translation command handler.
//!
//! Reads the selection and language cells out of the sheet, hands plain rows
//! to the batch loop, and writes each outcome back as soon as it arrives.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::error::ValidationError;
use crate::processor::{
    BatchJob, ERROR_MARKER_PREFIX, RowInput, RunReport, pacer_for, run_batch,
};
use crate::sheet::{CellRef, ColumnLayout, RowRange, Selection, Sheet};
use crate::translation::TranslationClient;
use crate::ui::{self, RowProgress, Style};
use crate::{status, warn};

pub struct TranslateOptions {
    pub sheet: PathBuf,
    pub range: String,
    /// `None` asks interactively.
    pub context: Option<bool>,
    pub resolve: ResolveOptions,
}

/// A validated run: the job for the batch loop plus where its rows live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub job: BatchJob,
    pub range: RowRange,
    pub layout: ColumnLayout,
}

impl RunPlan {
    /// Output cell for the `index`-th selected row.
    pub const fn output_cell(&self, index: usize) -> CellRef {
        CellRef::new(self.range.sheet_row(index), self.layout.output_column)
    }
}

/// Checks the preconditions and reads the selected rows.
///
/// Order matters: languages are checked first, then the context question is
/// asked, then the selection shape is checked. Nothing here sends a request.
pub fn plan_run<F>(
    sheet: &Sheet,
    source_cell: CellRef,
    target_cell: CellRef,
    selection: &Selection,
    ask_context: F,
) -> Result<RunPlan>
where
    F: FnOnce() -> Result<bool>,
{
    let source_language = sheet.get(source_cell).trim();
    let target_language = sheet.get(target_cell).trim();

    if source_language.is_empty() || target_language.is_empty() {
        return Err(ValidationError::MissingLanguages {
            source_cell: source_cell.to_string(),
            target_cell: target_cell.to_string(),
        }
        .into());
    }

    let has_context = ask_context()?;
    let range = selection.single_column()?;
    let layout = range.layout(has_context);

    let words = sheet.column_values(range.start_row, range.word_column, range.num_rows);
    // The declared context column is trusted as-is
    let contexts = layout
        .context_column
        .map(|col| sheet.column_values(range.start_row, col, range.num_rows));

    let rows = words
        .into_iter()
        .enumerate()
        .map(|(index, word)| RowInput {
            index,
            word,
            context: contexts
                .as_ref()
                .and_then(|c| c.get(index).cloned())
                .unwrap_or_default(),
        })
        .collect();

    Ok(RunPlan {
        job: BatchJob {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            rows,
        },
        range,
        layout,
    })
}

pub async fn run_translate(options: TranslateOptions) -> Result<RunReport> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let config = resolve_config(&options.resolve, &config_file)?;

    let mut sheet = Sheet::load(&options.sheet)?;
    let selection: Selection = options.range.parse()?;

    let plan = plan_run(
        &sheet,
        config.source_cell,
        config.target_cell,
        &selection,
        || options.context.map_or_else(ui::confirm_context_column, Ok),
    )?;

    let eligible = plan.job.eligible_count();
    let existing = plan
        .job
        .rows
        .iter()
        .filter(|row| row.is_eligible() && !sheet.get(plan.output_cell(row.index)).is_empty())
        .count();

    status!(
        "Translating {} from {} to {} ({} → column {}, {} via {})",
        counted(eligible, "word"),
        Style::value(&plan.job.source_language),
        Style::value(&plan.job.target_language),
        Style::cell(selection),
        Style::cell(plan.layout.output_letters()),
        Style::value(&config.client.model),
        Style::secondary(&config.provider_name),
    );
    if existing > 0 {
        status!(
            "{} {} in column {} will be overwritten",
            Style::warning("Note:"),
            counted(existing, "cell"),
            plan.layout.output_letters()
        );
    }

    let client = TranslationClient::new(config.client.clone())?;
    let mut pacer = pacer_for(config.delay);
    let progress = RowProgress::new(eligible);

    let report = run_batch(&plan.job, &client, pacer.as_mut(), |outcome| {
        let cell = plan.output_cell(outcome.index);
        sheet.set(cell, outcome.cell_text());
        sheet.save()?;

        if let Err(err) = &outcome.result {
            progress.println(format!("{} {cell}: {err}", Style::warning("Failed")));
        }
        progress.set_current(cell.to_string());
        progress.advance();
        Ok(())
    })
    .await?;

    progress.finish();
    print_report(&report, &plan);

    Ok(report)
}

/// `1 row`, `2 rows`.
fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn print_report(report: &RunReport, plan: &RunPlan) {
    if report.all_translated() {
        println!("{}", Style::success(report));
    } else {
        println!("{}", Style::warning(report));
        warn!(
            "{} {} failed; their cells in column {} start with \"{ERROR_MARKER_PREFIX}\"",
            Style::warning("Warning:"),
            counted(report.failed_count, "row"),
            plan.layout.output_letters()
        );
    }
}
