//! Bank-variant descriptors.
//!
//! Each supported bank contributes one [`VariantSpec`]: anchor phrases for
//! detection, row-opening patterns in the bank's column order, header/footer
//! noise patterns, the row date format, direction keyword lists, and the
//! positional fallback mapping. The generic extractor and resolver consume
//! these; adding a bank means adding an entry to [`VARIANTS`].

use anyhow::Result;
use chrono::NaiveDate;
use ledgersift_core::TransactionType;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::AmountSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BankVariant {
    Ocbc,
    Dbs,
}

/// One row-opening pattern: a line matching it starts a new candidate.
/// Named groups: `date`, `amount`, optional `value`, `balance`, `desc`.
#[derive(Debug, Clone, Copy)]
pub struct Opening {
    pub pattern: &'static str,
    pub amount_side: AmountSide,
}

#[derive(Debug, Clone, Copy)]
pub struct VariantSpec {
    pub variant: BankVariant,
    pub bank_name: &'static str,
    pub format_name: &'static str,
    pub account_type: &'static str,
    /// Every anchor must appear (case-insensitive) for detection; among
    /// matching variants the largest anchor set wins.
    pub anchors: &'static [&'static str],
    /// Tried in order; first match opens the candidate.
    pub openings: &'static [Opening],
    /// Lines matching these are statement furniture, never description text.
    pub skip_patterns: &'static [&'static str],
    pub date_format: &'static str,
    /// False when rows print day and month only; the statement year is
    /// appended before parsing.
    pub dates_include_year: bool,
    pub deposit_keywords: &'static [&'static str],
    pub withdrawal_keywords: &'static [&'static str],
    pub amount_left_means: TransactionType,
    pub amount_right_means: TransactionType,
}

impl VariantSpec {
    pub fn positional_type(&self, side: AmountSide) -> TransactionType {
        match side {
            AmountSide::Left => self.amount_left_means,
            AmountSide::Right => self.amount_right_means,
        }
    }

    /// Parse a row date, supplying `statement_year` when rows omit the year.
    pub fn parse_row_date(&self, text: &str, statement_year: i32) -> Option<NaiveDate> {
        let text = text.trim();
        if self.dates_include_year {
            NaiveDate::parse_from_str(text, self.date_format).ok()
        } else {
            let with_year = format!("{text} {statement_year}");
            let format = format!("{} %Y", self.date_format);
            NaiveDate::parse_from_str(&with_year, &format).ok()
        }
    }

    pub fn compile(&'static self) -> Result<CompiledVariant> {
        let mut openings = Vec::with_capacity(self.openings.len());
        for opening in self.openings {
            openings.push((Regex::new(opening.pattern)?, opening.amount_side));
        }
        let mut skips = Vec::with_capacity(self.skip_patterns.len());
        for pattern in self.skip_patterns {
            skips.push(Regex::new(&format!("(?i){pattern}"))?);
        }
        Ok(CompiledVariant {
            spec: self,
            openings,
            skips,
        })
    }
}

/// A variant with its regular expressions compiled for one processing run.
pub struct CompiledVariant {
    pub spec: &'static VariantSpec,
    pub openings: Vec<(Regex, AmountSide)>,
    pub skips: Vec<Regex>,
}

impl CompiledVariant {
    pub fn is_noise(&self, line: &str) -> bool {
        self.skips.iter().any(|re| re.is_match(line))
    }
}

const OCBC_AMOUNT: &str = r"\d{1,3}(?:,\d{3})*\.\d{2}";

pub static OCBC: VariantSpec = VariantSpec {
    variant: BankVariant::Ocbc,
    bank_name: "OCBC Bank",
    format_name: "OCBC Business Growth Account Statement",
    account_type: "Business Growth Account",
    anchors: &["OCBC Bank", "BUSINESS GROWTH ACCOUNT"],
    openings: &[
        // Date Amount [Balance] ValueDate Description… (an empty cheque
        // column sometimes extracts as a dash between date and amount)
        Opening {
            pattern: r"^(?P<date>\d{1,2}\s+[A-Z]{3,4})\s+(?:[—–-]\s+)?(?P<amount>\d{1,3}(?:,\d{3})*\.\d{2})(?:\s+(?P<balance>\d{1,3}(?:,\d{3})*\.\d{2}))?\s+(?P<value>\d{1,2}\s+[A-Z]{3,4})\s+(?P<desc>.+)$",
            amount_side: AmountSide::Left,
        },
        // Date Description… ValueDate Amount
        Opening {
            pattern: r"^(?P<date>\d{1,2}\s+[A-Z]{3,4})\s+(?P<desc>.+?)\s+(?P<value>\d{1,2}\s+[A-Z]{3,4})\s+(?P<amount>\d{1,3}(?:,\d{3})*\.\d{2})$",
            amount_side: AmountSide::Right,
        },
    ],
    skip_patterns: &[
        r"^Page \d+ of \d+$",
        r"^BALANCE B/F",
        r"^Total$",
        r"^For enquiries",
    ],
    date_format: "%d %b",
    dates_include_year: false,
    deposit_keywords: &[
        "PAYMENT /TRANSFER OTHR",
        "GIRO PAYMENT",
        "FAST TRANSFER OTHR",
        "TRANSFER",
        "CASH REBATE",
        "ALLW",
        "BEXP",
    ],
    withdrawal_keywords: &[
        "DEBIT PURCHASE",
        "CHARGES",
        "CCY CONVERSION FEE",
        "FAST TRANSFER OTHR",
    ],
    amount_left_means: TransactionType::Withdrawal,
    amount_right_means: TransactionType::Deposit,
};

pub static DBS: VariantSpec = VariantSpec {
    variant: BankVariant::Dbs,
    bank_name: "DBS Bank",
    format_name: "DBS Corporate Account Statement",
    account_type: "Corporate Current Account",
    anchors: &["DBS Bank Ltd", "Corporate Current Account"],
    openings: &[
        // Date Amount Description…
        Opening {
            pattern: r"^(?P<date>\d{1,2}-[A-Za-z]{3}-\d{2})\s+(?P<amount>\d{1,3}(?:,\d{3})*(?:\.\d{2})?)\s+(?P<desc>.+)$",
            amount_side: AmountSide::Right,
        },
        // Amount Date Description…
        Opening {
            pattern: r"^(?P<amount>\d{1,3}(?:,\d{3})*(?:\.\d{2})?)\s+(?P<date>\d{1,2}-[A-Za-z]{3}-\d{2})\s+(?P<desc>.+)$",
            amount_side: AmountSide::Left,
        },
        // Description… AmountDate [Balance] — amount glued to the date when
        // column boundaries collapse in extraction
        Opening {
            pattern: r"^(?P<desc>.+?)\s*(?P<amount>\d{1,3}(?:,\d{3})*(?:\.\d{2})?)(?P<date>\d{1,2}-[A-Za-z]{3}-\d{2})(?:\s+(?P<balance>\d{1,3}(?:,\d{3})*(?:\.\d{2})?))?\s*$",
            amount_side: AmountSide::Left,
        },
    ],
    skip_patterns: &[
        r"^Page \d+ of \d+$",
        r"^Balance Brought Forward",
        r"^Balance B/F",
        r"^Total$",
        r"^Currency:",
        r"^Account No",
    ],
    date_format: "%d-%b-%y",
    dates_include_year: true,
    deposit_keywords: &[
        "REMITTANCE TRANSFER OF FUNDS RTF",
        "IBG GIRO",
        "TRANSFER",
        "CASH TRANSACTION",
    ],
    withdrawal_keywords: &[
        "FAST PAYMENT",
        "GIRO PAYMENT",
        "SERVICE CHARGE",
        "INTERBANK GIRO IBG",
    ],
    amount_left_means: TransactionType::Withdrawal,
    amount_right_means: TransactionType::Deposit,
};

/// All supported variants, in detection-preference order for ties.
pub static VARIANTS: &[&VariantSpec] = &[&OCBC, &DBS];
