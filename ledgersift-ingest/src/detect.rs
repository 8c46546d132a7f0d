//! Bank-format detection from anchor phrases.

use tracing::debug;

use crate::variant::{VariantSpec, VARIANTS};

/// Identify the issuing bank from extracted statement text.
///
/// A variant matches when every one of its anchor phrases appears in the
/// text (case-insensitive). When several match, the variant with the larger
/// anchor set is the more specific one and wins; ties keep the earlier
/// entry in [`VARIANTS`]. `None` means unsupported — an expected outcome
/// the caller records per-file, not a failure.
pub fn detect_bank(text: &str) -> Option<&'static VariantSpec> {
    let haystack = text.to_lowercase();
    let mut best: Option<&'static VariantSpec> = None;
    for &spec in VARIANTS {
        let satisfied = spec
            .anchors
            .iter()
            .all(|anchor| haystack.contains(&anchor.to_lowercase()));
        if !satisfied {
            continue;
        }
        debug!(bank = spec.bank_name, anchors = spec.anchors.len(), "anchor set satisfied");
        match best {
            Some(current) if current.anchors.len() >= spec.anchors.len() => {}
            _ => best = Some(spec),
        }
    }
    best
}
