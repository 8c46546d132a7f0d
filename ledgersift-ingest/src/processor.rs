//! Document processor: detect → extract → resolve → normalized transactions.

use anyhow::Result;
use ledgersift_core::Transaction;
use tracing::{debug, info, warn};

use crate::detect::detect_bank;
use crate::extract::extract_candidates;
use crate::resolve::resolve_type;
use crate::types::{DocumentResult, RawCandidate, SourceDocument};
use crate::variant::VariantSpec;

/// Process one document's page text into a [`DocumentResult`].
///
/// Unsupported formats and malformed candidates are recorded in
/// `extraction_errors` and never abort the document; the `Err` path exists
/// only for internal descriptor problems.
pub fn process_document(doc: &SourceDocument) -> Result<DocumentResult> {
    let text = doc.full_text();
    let Some(spec) = detect_bank(&text) else {
        warn!(file = %doc.file_name, "no supported bank format detected");
        return Ok(DocumentResult::unsupported(&doc.file_name, doc.pages.len()));
    };
    info!(file = %doc.file_name, bank = spec.bank_name, "detected statement format");

    let compiled = spec.compile()?;
    let candidates = extract_candidates(&compiled, doc);
    debug!(
        file = %doc.file_name,
        candidates = candidates.len(),
        "extracted transaction candidates"
    );

    let mut transactions = Vec::with_capacity(candidates.len());
    let mut extraction_errors = Vec::new();
    for candidate in &candidates {
        match normalize_candidate(spec, candidate, doc) {
            Ok((transaction, note)) => {
                extraction_errors.extend(note);
                transactions.push(transaction);
            }
            Err(problem) => {
                warn!(file = %doc.file_name, %problem, "dropped candidate");
                extraction_errors.push(problem);
            }
        }
    }

    info!(
        file = %doc.file_name,
        transactions = transactions.len(),
        errors = extraction_errors.len(),
        "document processed"
    );
    Ok(DocumentResult {
        file_name: doc.file_name.clone(),
        bank_name: spec.bank_name.to_string(),
        transactions,
        page_count: doc.pages.len(),
        extraction_errors,
    })
}

/// Turn one raw candidate into a transaction, or a drop reason with line
/// context. The optional note carries the low-confidence flag from the
/// resolver's default-to-Withdrawal tier.
fn normalize_candidate(
    spec: &'static VariantSpec,
    candidate: &RawCandidate,
    doc: &SourceDocument,
) -> std::result::Result<(Transaction, Option<String>), String> {
    let description = candidate.description();

    let amount = parse_amount(&candidate.amount_text).ok_or_else(|| {
        format!(
            "line {}: unparseable amount '{}' ({})",
            candidate.line_no,
            candidate.amount_text,
            preview(&description)
        )
    })?;

    let transaction_date = spec
        .parse_row_date(&candidate.date_text, doc.statement_year)
        .ok_or_else(|| {
            format!(
                "line {}: unparseable date '{}' ({})",
                candidate.line_no,
                candidate.date_text,
                preview(&description)
            )
        })?;

    let value_date = candidate
        .value_date_text
        .as_deref()
        .and_then(|text| spec.parse_row_date(text, doc.statement_year))
        .unwrap_or(transaction_date);

    let balance = candidate.balance_text.as_deref().and_then(parse_amount);

    let resolution = resolve_type(spec, &description, candidate.amount_side);
    let note = resolution.low_confidence.then(|| {
        format!(
            "line {}: no direction keyword matched; defaulted to Withdrawal ({})",
            candidate.line_no,
            preview(&description)
        )
    });

    let transaction = Transaction::new(
        transaction_date,
        value_date,
        description,
        amount,
        resolution.kind,
        balance,
    )
    .with_provenance(&doc.file_name, spec.bank_name, spec.account_type);
    Ok((transaction, note))
}

/// Parse a printed amount, tolerating thousands separators and currency
/// markers ("1,234.56", "S$ 650.47").
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn preview(description: &str) -> String {
    const MAX: usize = 50;
    if description.chars().count() <= MAX {
        description.to_string()
    } else {
        let cut: String = description.chars().take(MAX).collect();
        format!("{cut}...")
    }
}
