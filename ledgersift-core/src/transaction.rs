//! Normalized transaction records shared by every stage of the pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::merchant::OTHER_CATEGORY;

/// Money direction of a statement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Withdrawal,
    Deposit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::Deposit => "Deposit",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One statement entry, normalized across bank formats.
///
/// Exactly one of `withdrawal`/`deposit` is populated, and it always agrees
/// with `transaction_type`. Build these through [`Transaction::new`], which
/// places the amount in the field matching the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_date: NaiveDate,
    /// Equal to `transaction_date` when the statement prints only one date.
    pub value_date: NaiveDate,
    /// May join several physical statement lines belonging to one entry.
    pub description: String,
    pub withdrawal: Option<f64>,
    pub deposit: Option<f64>,
    /// Running balance as printed; never recomputed.
    pub balance: Option<f64>,
    /// Assigned during aggregation; defaults to "Other".
    pub merchant_category: String,
    pub transaction_type: TransactionType,
    pub source_file: String,
    pub bank_name: String,
    pub account_type: String,
}

impl Transaction {
    pub fn new(
        transaction_date: NaiveDate,
        value_date: NaiveDate,
        description: String,
        amount: f64,
        kind: TransactionType,
        balance: Option<f64>,
    ) -> Self {
        let (withdrawal, deposit) = match kind {
            TransactionType::Withdrawal => (Some(amount), None),
            TransactionType::Deposit => (None, Some(amount)),
        };
        Transaction {
            transaction_date,
            value_date,
            description,
            withdrawal,
            deposit,
            balance,
            merchant_category: OTHER_CATEGORY.to_string(),
            transaction_type: kind,
            source_file: String::new(),
            bank_name: String::new(),
            account_type: String::new(),
        }
    }

    /// Stamp where this transaction came from.
    pub fn with_provenance(
        mut self,
        source_file: &str,
        bank_name: &str,
        account_type: &str,
    ) -> Self {
        self.source_file = source_file.to_string();
        self.bank_name = bank_name.to_string();
        self.account_type = account_type.to_string();
        self
    }

    /// The populated amount, whichever side it sits on.
    pub fn amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Withdrawal => self.withdrawal.unwrap_or(0.0),
            TransactionType::Deposit => self.deposit.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_withdrawal_populates_exactly_one_field() {
        let t = Transaction::new(
            date(2022, 9, 1),
            date(2022, 9, 1),
            "FAST PAYMENT PH13765".to_string(),
            273.92,
            TransactionType::Withdrawal,
            None,
        );
        assert_eq!(t.withdrawal, Some(273.92));
        assert_eq!(t.deposit, None);
        assert_eq!(t.transaction_type, TransactionType::Withdrawal);
        assert_eq!(t.amount(), 273.92);
        assert_eq!(t.merchant_category, "Other");
    }

    #[test]
    fn test_deposit_populates_exactly_one_field() {
        let t = Transaction::new(
            date(2025, 6, 1),
            date(2025, 6, 2),
            "PAYMENT /TRANSFER OTHR".to_string(),
            650.47,
            TransactionType::Deposit,
            Some(1_204.10),
        );
        assert_eq!(t.deposit, Some(650.47));
        assert_eq!(t.withdrawal, None);
        assert_eq!(t.balance, Some(1_204.10));
        assert_eq!(t.transaction_type, TransactionType::Deposit);
    }

    #[test]
    fn test_provenance_stamping() {
        let t = Transaction::new(
            date(2025, 6, 1),
            date(2025, 6, 1),
            "GIRO PAYMENT".to_string(),
            10.0,
            TransactionType::Deposit,
            None,
        )
        .with_provenance("june.pdf", "OCBC Bank", "Business Growth Account");
        assert_eq!(t.source_file, "june.pdf");
        assert_eq!(t.bank_name, "OCBC Bank");
        assert_eq!(t.account_type, "Business Growth Account");
    }

    #[test]
    fn test_serde_round_trip() {
        let t = Transaction::new(
            date(2022, 9, 1),
            date(2022, 9, 1),
            "SERVICE CHARGE".to_string(),
            30.0,
            TransactionType::Withdrawal,
            Some(500.0),
        );
        let json = serde_json::to_string(&t).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
