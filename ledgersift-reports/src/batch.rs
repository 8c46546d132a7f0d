//! Batch aggregation: documents → batches → master/per-batch/summary data.
//!
//! Batches are contiguous, order-preserving slices of the *document* list;
//! transactions inside a batch keep document order, then line order.
//! Merchant categorization runs here, once per transaction, so a changed
//! category configuration only needs [`aggregate`] again — never a re-parse.

use anyhow::Result;
use ledgersift_core::{ConfigError, MerchantConfig, Transaction};
use ledgersift_ingest::{process_document, DocumentResult, SourceDocument};
use tracing::info;

use crate::summary::{build_summary, SummaryReport};

/// Which datasets the run should produce. Must be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub master: bool,
    pub per_batch: bool,
    pub summary: bool,
}

impl OutputOptions {
    pub fn any(&self) -> bool {
        self.master || self.per_batch || self.summary
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            master: true,
            per_batch: true,
            summary: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum documents per batch.
    pub batch_size: usize,
    pub outputs: OutputOptions,
}

impl BatchOptions {
    pub fn new(batch_size: usize) -> Self {
        BatchOptions {
            batch_size,
            outputs: OutputOptions::default(),
        }
    }

    /// Configuration problems are fatal and rejected before any document
    /// is touched.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size as i64));
        }
        if !self.outputs.any() {
            return Err(ConfigError::NoOutputsRequested);
        }
        Ok(())
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions::new(50)
    }
}

/// One batch of documents and their categorized transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// 1-based batch number.
    pub index: usize,
    /// Total batch count for the run.
    pub total: usize,
    pub files: Vec<String>,
    pub transactions: Vec<Transaction>,
}

/// Everything one processing run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub documents: Vec<DocumentResult>,
    pub batches: Vec<Batch>,
    /// Concatenation of all batches in original order, when requested.
    pub master: Option<Vec<Transaction>>,
    pub summary: Option<SummaryReport>,
    pub batch_size: usize,
}

/// Full pipeline: extract every document, then aggregate.
pub fn run(
    docs: &[SourceDocument],
    options: &BatchOptions,
    config: &MerchantConfig,
) -> Result<RunOutput> {
    options.validate()?;
    let mut documents = Vec::with_capacity(docs.len());
    for doc in docs {
        documents.push(process_document(doc)?);
    }
    Ok(aggregate(documents, options, config)?)
}

/// Aggregate already-extracted document results. Re-running with a changed
/// merchant configuration re-labels categories and rebuilds summaries
/// without touching amounts, types, or ordering.
pub fn aggregate(
    documents: Vec<DocumentResult>,
    options: &BatchOptions,
    config: &MerchantConfig,
) -> std::result::Result<RunOutput, ConfigError> {
    options.validate()?;

    let batch_count = documents.len().div_ceil(options.batch_size);
    let mut batches = Vec::with_capacity(batch_count);
    for (i, chunk) in documents.chunks(options.batch_size).enumerate() {
        let mut transactions = Vec::new();
        for doc in chunk {
            for transaction in &doc.transactions {
                let mut transaction = transaction.clone();
                transaction.merchant_category =
                    config.categorize(&transaction.description).to_string();
                transactions.push(transaction);
            }
        }
        batches.push(Batch {
            index: i + 1,
            total: batch_count,
            files: chunk.iter().map(|d| d.file_name.clone()).collect(),
            transactions,
        });
    }

    let all: Vec<Transaction> = batches
        .iter()
        .flat_map(|b| b.transactions.iter().cloned())
        .collect();
    info!(
        files = documents.len(),
        batches = batches.len(),
        transactions = all.len(),
        "aggregation complete"
    );

    let summary = options
        .outputs
        .summary
        .then(|| build_summary(&documents, &all, batches.len(), options.batch_size));
    let master = options.outputs.master.then_some(all);

    Ok(RunOutput {
        documents,
        batches,
        master,
        summary,
        batch_size: options.batch_size,
    })
}
