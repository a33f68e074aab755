use anyhow::{Result, bail};
use inquire::{Confirm, InquireError};

mod progress;
mod style;

pub use progress::RowProgress;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Turns a prompt cancellation (Ctrl+C or Escape) anywhere in `result` into `Ok(None)`.
///
/// Other errors pass through unchanged.
pub fn handle_prompt_cancellation<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            eprintln!();
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Asks whether the column right of the selection holds per-row context.
pub fn confirm_context_column() -> Result<bool> {
    let answer = Confirm::new("Is there a context column next to your words?")
        .with_help_message("Column to the right of the selected column")
        .with_default(false)
        .prompt();

    match answer {
        Ok(answer) => Ok(answer),
        Err(InquireError::NotTTY) => bail!(
            "Cannot ask about the context column without a terminal.\n\n\
             Pass --context or --no-context."
        ),
        Err(e) => Err(e.into()),
    }
}
