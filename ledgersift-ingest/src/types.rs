use ledgersift_core::Transaction;
use serde::{Deserialize, Serialize};

/// Bank name recorded when no variant's anchor phrases matched.
pub const UNSUPPORTED_BANK: &str = "unsupported";

/// Collaborator input: one statement document's extracted text.
///
/// `pages` holds each page's text in order, lines separated by newlines.
/// `statement_year` supplies the year for variants whose rows print only
/// day and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub file_name: String,
    pub pages: Vec<String>,
    pub statement_year: i32,
}

impl SourceDocument {
    pub fn new(file_name: impl Into<String>, pages: Vec<String>, statement_year: i32) -> Self {
        SourceDocument {
            file_name: file_name.into(),
            pages,
            statement_year,
        }
    }

    /// All pages joined, used for anchor-phrase detection.
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }
}

/// Which column the amount token was captured from, relative to the date
/// columns of the row. Feeds the positional fallback in type resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountSide {
    Left,
    Right,
}

/// A raw transaction candidate: one opening line plus any continuation
/// lines, not yet validated or type-resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    /// 1-based physical line number (within the document) of the opening
    /// line, kept for error context.
    pub line_no: usize,
    pub date_text: String,
    /// Present when the row prints a separate value date.
    pub value_date_text: Option<String>,
    pub description_lines: Vec<String>,
    pub amount_text: String,
    pub balance_text: Option<String>,
    pub amount_side: AmountSide,
}

impl RawCandidate {
    /// Continuation lines joined into one description, whitespace collapsed.
    pub fn description(&self) -> String {
        let joined = self.description_lines.join(" ");
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Outcome of processing one document. Never a hard failure: unsupported
/// formats and unparseable candidates surface in `extraction_errors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub file_name: String,
    /// Detected bank, or [`UNSUPPORTED_BANK`].
    pub bank_name: String,
    pub transactions: Vec<Transaction>,
    pub page_count: usize,
    pub extraction_errors: Vec<String>,
}

impl DocumentResult {
    pub fn unsupported(file_name: &str, page_count: usize) -> Self {
        DocumentResult {
            file_name: file_name.to_string(),
            bank_name: UNSUPPORTED_BANK.to_string(),
            transactions: Vec::new(),
            page_count,
            extraction_errors: vec![format!(
                "{file_name}: no supported bank format detected"
            )],
        }
    }

    pub fn is_supported(&self) -> bool {
        self.bank_name != UNSUPPORTED_BANK
    }
}
