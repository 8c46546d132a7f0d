//! Transaction-type resolution: which side of the ledger an amount lands on.
//!
//! Three tiers, in order:
//! 1. an unambiguous variant keyword for exactly one direction,
//! 2. keywords for both directions ("mixed" categories like supplier
//!    payments) — fall back to the variant's positional rule on which
//!    column the amount token was captured from,
//! 3. no keyword at all — default to Withdrawal and flag the transaction
//!    as low-confidence, since unclassified business-account entries skew
//!    heavily toward outflows.

use ledgersift_core::TransactionType;

use crate::types::AmountSide;
use crate::variant::VariantSpec;

/// Outcome of type resolution for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub kind: TransactionType,
    /// True only when the tier-3 default bias decided the direction.
    pub low_confidence: bool,
}

pub fn resolve_type(spec: &VariantSpec, description: &str, side: AmountSide) -> Resolution {
    let description = description.to_uppercase();
    let matches_any =
        |keywords: &[&str]| keywords.iter().any(|kw| description.contains(kw));

    let deposit = matches_any(spec.deposit_keywords);
    let withdrawal = matches_any(spec.withdrawal_keywords);

    match (deposit, withdrawal) {
        (true, false) => Resolution {
            kind: TransactionType::Deposit,
            low_confidence: false,
        },
        (false, true) => Resolution {
            kind: TransactionType::Withdrawal,
            low_confidence: false,
        },
        (true, true) => Resolution {
            kind: spec.positional_type(side),
            low_confidence: false,
        },
        (false, false) => Resolution {
            kind: TransactionType::Withdrawal,
            low_confidence: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{DBS, OCBC};

    #[test]
    fn test_unambiguous_deposit_keyword() {
        let r = resolve_type(
            &OCBC,
            "PAYMENT /TRANSFER OTHR S$ MUHAMMAD HARITH BIN",
            AmountSide::Left,
        );
        assert_eq!(r.kind, TransactionType::Deposit);
        assert!(!r.low_confidence);
    }

    #[test]
    fn test_unambiguous_withdrawal_keyword() {
        let r = resolve_type(&OCBC, "debit purchase amzn mktp sg", AmountSide::Right);
        assert_eq!(r.kind, TransactionType::Withdrawal);
        assert!(!r.low_confidence);

        let r = resolve_type(&DBS, "SERVICE CHARGE SEP 2022", AmountSide::Right);
        assert_eq!(r.kind, TransactionType::Withdrawal);
    }

    #[test]
    fn test_mixed_keywords_fall_back_to_amount_column() {
        // "FAST TRANSFER OTHR" sits in both OCBC keyword lists.
        let left = resolve_type(&OCBC, "FAST TRANSFER OTHR REF 991", AmountSide::Left);
        assert_eq!(left.kind, TransactionType::Withdrawal);
        assert!(!left.low_confidence);

        let right = resolve_type(&OCBC, "FAST TRANSFER OTHR REF 991", AmountSide::Right);
        assert_eq!(right.kind, TransactionType::Deposit);
        assert!(!right.low_confidence);
    }

    #[test]
    fn test_no_keyword_defaults_to_withdrawal_with_flag() {
        let r = resolve_type(&DBS, "CHQ 004521 ACME PTE LTD", AmountSide::Right);
        assert_eq!(r.kind, TransactionType::Withdrawal);
        assert!(r.low_confidence);
    }

    #[test]
    fn test_dbs_mixed_transfer_uses_position() {
        // "TRANSFER" (deposit list) and "GIRO PAYMENT" (withdrawal list)
        // together make the description ambiguous.
        let desc = "GIRO PAYMENT TRANSFER TO SUPPLIER";
        let left = resolve_type(&DBS, desc, AmountSide::Left);
        assert_eq!(left.kind, TransactionType::Withdrawal);
        let right = resolve_type(&DBS, desc, AmountSide::Right);
        assert_eq!(right.kind, TransactionType::Deposit);
    }
}
