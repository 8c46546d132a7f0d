//! ledgersift-ingest: bank-format detection and statement-text extraction.
//!
//! Takes pre-extracted page text (PDF decoding happens upstream), identifies
//! the issuing bank, and turns the text into normalized transactions. Each
//! supported bank is a data-driven [`variant::VariantSpec`] consumed by one
//! generic extraction algorithm; adding a bank means adding a descriptor.

pub mod detect;
pub mod extract;
pub mod processor;
pub mod resolve;
pub mod types;
pub mod variant;

pub use detect::detect_bank;
pub use processor::process_document;
pub use types::{AmountSide, DocumentResult, RawCandidate, SourceDocument, UNSUPPORTED_BANK};
pub use variant::{BankVariant, VariantSpec, VARIANTS};
