//! ledgersift-reports: batch aggregation, summary datasets, and CSV export.

pub mod batch;
pub mod export;
pub mod summary;

pub use batch::{aggregate, run, Batch, BatchOptions, OutputOptions, RunOutput};
pub use export::{transactions_to_csv, write_run_output, write_summary_csvs};
pub use summary::SummaryReport;
