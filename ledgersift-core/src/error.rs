//! Configuration errors. These are the only fatal errors in a run: they are
//! rejected before any document is touched. Everything downstream
//! (unsupported formats, unparseable candidates) is recorded per-file and
//! never aborts processing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("batch size must be a positive integer, got {0}")]
    InvalidBatchSize(i64),

    #[error("at least one output (master, per-batch, summary) must be enabled")]
    NoOutputsRequested,
}
