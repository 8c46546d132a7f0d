//! Generic statement-text extraction: one algorithm, driven by the variant
//! descriptor's row-opening patterns.
//!
//! A line matching an opening pattern starts a new candidate; every
//! following line that opens nothing is appended to the open candidate's
//! description until the next opening line or the end of the document. The
//! open candidate is held in an explicit [`ExtractState`] that survives page
//! boundaries, so a row whose description continues on the next page is
//! reassembled into one candidate.

use crate::types::{RawCandidate, SourceDocument};
use crate::variant::CompiledVariant;

/// Parsing state carried across pages of one document.
#[derive(Debug, Default)]
pub struct ExtractState {
    /// The candidate currently accumulating continuation lines, if any.
    open: Option<RawCandidate>,
}

impl ExtractState {
    fn finish(&mut self, out: &mut Vec<RawCandidate>) {
        if let Some(candidate) = self.open.take() {
            out.push(candidate);
        }
    }
}

/// Extract raw transaction candidates from a document already identified as
/// `compiled`'s variant.
pub fn extract_candidates(compiled: &CompiledVariant, doc: &SourceDocument) -> Vec<RawCandidate> {
    let mut out = Vec::new();
    let mut state = ExtractState::default();
    let mut line_no = 0usize;
    for page in &doc.pages {
        extract_page(compiled, page, &mut line_no, &mut state, &mut out);
    }
    state.finish(&mut out);
    out
}

fn extract_page(
    compiled: &CompiledVariant,
    page: &str,
    line_no: &mut usize,
    state: &mut ExtractState,
    out: &mut Vec<RawCandidate>,
) {
    for raw_line in page.lines() {
        *line_no += 1;
        let line = raw_line.trim();
        if line.is_empty() || compiled.is_noise(line) {
            continue;
        }
        if let Some(candidate) = try_open(compiled, line, *line_no) {
            state.finish(out);
            state.open = Some(candidate);
            continue;
        }
        // Not a new row: a date without a parseable amount, an address
        // line, a reference number — all description continuation, but
        // only once a candidate is open.
        if let Some(open) = state.open.as_mut() {
            open.description_lines.push(line.to_string());
        }
    }
}

fn try_open(compiled: &CompiledVariant, line: &str, line_no: usize) -> Option<RawCandidate> {
    for (re, side) in &compiled.openings {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let description_lines = caps
            .name("desc")
            .map(|m| vec![m.as_str().trim().to_string()])
            .unwrap_or_default();
        return Some(RawCandidate {
            line_no,
            date_text: caps["date"].trim().to_string(),
            value_date_text: caps.name("value").map(|m| m.as_str().trim().to_string()),
            description_lines,
            amount_text: caps["amount"].to_string(),
            balance_text: caps.name("balance").map(|m| m.as_str().to_string()),
            amount_side: *side,
        });
    }
    None
}
