//! The row-processing loop, independent of where rows come from.

mod batch;
mod pacing;

pub use batch::{
    BatchJob, ERROR_MARKER_PREFIX, RowInput, RowOutcome, RunReport, run_batch,
};
pub use pacing::{DEFAULT_DELAY, FixedInterval, Pacer, Unpaced, pacer_for};
