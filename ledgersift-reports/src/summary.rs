//! Summary datasets derived from a finished run.
//!
//! Five sub-tables, mirroring the summary report sheets: processing
//! metrics, per-bank counts, per-file details, per-category totals split by
//! direction, and the category × bank breakdown. Row order is first-seen
//! order over documents/transactions, so identical inputs always produce
//! identical tables.

use ledgersift_core::{Transaction, TransactionType};
use ledgersift_ingest::DocumentResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankSummaryRow {
    #[serde(rename = "Bank")]
    pub bank: String,
    #[serde(rename = "File_Count")]
    pub file_count: usize,
    #[serde(rename = "Transaction_Count")]
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDetailRow {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Bank")]
    pub bank: String,
    #[serde(rename = "Transactions")]
    pub transactions: usize,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantCategoryRow {
    #[serde(rename = "Merchant_Category")]
    pub merchant_category: String,
    #[serde(rename = "Total_Count")]
    pub total_count: usize,
    #[serde(rename = "Total_Withdrawal")]
    pub total_withdrawal: String,
    #[serde(rename = "Total_Deposit")]
    pub total_deposit: String,
    #[serde(rename = "Net_Amount")]
    pub net_amount: String,
    #[serde(rename = "Deposits_Count")]
    pub deposits_count: usize,
    #[serde(rename = "Withdrawals_Count")]
    pub withdrawals_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankBreakdownRow {
    #[serde(rename = "Merchant_Category")]
    pub merchant_category: String,
    #[serde(rename = "Bank_Name")]
    pub bank_name: String,
    #[serde(rename = "Transaction_Count")]
    pub transaction_count: usize,
    #[serde(rename = "Withdrawal_Amount")]
    pub withdrawal_amount: String,
    #[serde(rename = "Deposit_Amount")]
    pub deposit_amount: String,
    #[serde(rename = "Net_Amount")]
    pub net_amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub processing: Vec<MetricRow>,
    pub bank_summary: Vec<BankSummaryRow>,
    pub file_details: Vec<FileDetailRow>,
    pub merchant_categories: Vec<MerchantCategoryRow>,
    pub bank_breakdown: Vec<BankBreakdownRow>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    count: usize,
    withdrawal: f64,
    deposit: f64,
    deposits_count: usize,
    withdrawals_count: usize,
}

impl Totals {
    fn add(&mut self, transaction: &Transaction) {
        self.count += 1;
        match transaction.transaction_type {
            TransactionType::Withdrawal => {
                self.withdrawals_count += 1;
                self.withdrawal += transaction.amount();
            }
            TransactionType::Deposit => {
                self.deposits_count += 1;
                self.deposit += transaction.amount();
            }
        }
    }
}

/// Build the summary sub-tables from the document results and the flat,
/// categorized transaction list.
pub fn build_summary(
    documents: &[DocumentResult],
    transactions: &[Transaction],
    batch_count: usize,
    batch_size: usize,
) -> SummaryReport {
    let processing = vec![
        MetricRow {
            metric: "Total Files Processed".to_string(),
            value: documents.len().to_string(),
        },
        MetricRow {
            metric: "Total Transactions".to_string(),
            value: transactions.len().to_string(),
        },
        MetricRow {
            metric: "Total Batches".to_string(),
            value: batch_count.to_string(),
        },
        MetricRow {
            metric: "Batch Size Used".to_string(),
            value: batch_size.to_string(),
        },
    ];

    let mut banks: Vec<(String, usize, usize)> = Vec::new();
    for doc in documents {
        match banks.iter_mut().find(|(bank, _, _)| *bank == doc.bank_name) {
            Some((_, files, txns)) => {
                *files += 1;
                *txns += doc.transactions.len();
            }
            None => banks.push((doc.bank_name.clone(), 1, doc.transactions.len())),
        }
    }
    let bank_summary = banks
        .into_iter()
        .map(|(bank, file_count, transaction_count)| BankSummaryRow {
            bank,
            file_count,
            transaction_count,
        })
        .collect();

    let file_details = documents
        .iter()
        .map(|doc| FileDetailRow {
            filename: doc.file_name.clone(),
            bank: doc.bank_name.clone(),
            transactions: doc.transactions.len(),
            status: if doc.is_supported() { "Success" } else { "Failed" }.to_string(),
            notes: doc.extraction_errors.join("; "),
        })
        .collect();

    let mut categories: Vec<(String, Totals)> = Vec::new();
    let mut crosses: Vec<((String, String), Totals)> = Vec::new();
    for transaction in transactions {
        let category = transaction.merchant_category.clone();
        match categories.iter_mut().find(|(c, _)| *c == category) {
            Some((_, totals)) => totals.add(transaction),
            None => {
                let mut totals = Totals::default();
                totals.add(transaction);
                categories.push((category.clone(), totals));
            }
        }
        let key = (category, transaction.bank_name.clone());
        match crosses.iter_mut().find(|(k, _)| *k == key) {
            Some((_, totals)) => totals.add(transaction),
            None => {
                let mut totals = Totals::default();
                totals.add(transaction);
                crosses.push((key, totals));
            }
        }
    }

    let merchant_categories = categories
        .into_iter()
        .map(|(merchant_category, t)| MerchantCategoryRow {
            merchant_category,
            total_count: t.count,
            total_withdrawal: fmt_money(t.withdrawal),
            total_deposit: fmt_money(t.deposit),
            net_amount: fmt_money(t.deposit - t.withdrawal),
            deposits_count: t.deposits_count,
            withdrawals_count: t.withdrawals_count,
        })
        .collect();

    let bank_breakdown = crosses
        .into_iter()
        .map(|((merchant_category, bank_name), t)| BankBreakdownRow {
            merchant_category,
            bank_name,
            transaction_count: t.count,
            withdrawal_amount: fmt_money(t.withdrawal),
            deposit_amount: fmt_money(t.deposit),
            net_amount: fmt_money(t.deposit - t.withdrawal),
        })
        .collect();

    SummaryReport {
        processing,
        bank_summary,
        file_details,
        merchant_categories,
        bank_breakdown,
    }
}

/// Format an amount the way the summary sheets print money: "$1,234.56".
pub fn fmt_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let (dollars, rem) = (cents / 100, cents % 100);
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${sign}{grouped}.{rem:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(
        description: &str,
        amount: f64,
        kind: TransactionType,
        category: &str,
        bank: &str,
    ) -> Transaction {
        let mut t = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            description.to_string(),
            amount,
            kind,
            None,
        )
        .with_provenance("a.pdf", bank, "Business Growth Account");
        t.merchant_category = category.to_string();
        t
    }

    fn doc(file: &str, bank: &str, transactions: Vec<Transaction>) -> DocumentResult {
        DocumentResult {
            file_name: file.to_string(),
            bank_name: bank.to_string(),
            transactions,
            page_count: 1,
            extraction_errors: Vec::new(),
        }
    }

    #[test]
    fn test_fmt_money_groups_thousands() {
        assert_eq!(fmt_money(0.0), "$0.00");
        assert_eq!(fmt_money(5.5), "$5.50");
        assert_eq!(fmt_money(1234.56), "$1,234.56");
        assert_eq!(fmt_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(fmt_money(-273.92), "$-273.92");
    }

    #[test]
    fn test_category_totals_split_by_direction() {
        let transactions = vec![
            txn("A", 100.0, TransactionType::Withdrawal, "Amazon", "OCBC Bank"),
            txn("B", 40.0, TransactionType::Deposit, "Amazon", "OCBC Bank"),
            txn("C", 7.0, TransactionType::Withdrawal, "Other", "DBS Bank"),
        ];
        let documents = vec![doc("a.pdf", "OCBC Bank", vec![])];
        let report = build_summary(&documents, &transactions, 1, 50);

        assert_eq!(report.merchant_categories.len(), 2);
        let amazon = &report.merchant_categories[0];
        assert_eq!(amazon.merchant_category, "Amazon");
        assert_eq!(amazon.total_count, 2);
        assert_eq!(amazon.total_withdrawal, "$100.00");
        assert_eq!(amazon.total_deposit, "$40.00");
        assert_eq!(amazon.net_amount, "$-60.00");
        assert_eq!(amazon.withdrawals_count, 1);
        assert_eq!(amazon.deposits_count, 1);
    }

    #[test]
    fn test_bank_breakdown_crosses_category_and_bank() {
        let transactions = vec![
            txn("A", 10.0, TransactionType::Withdrawal, "Gpay", "OCBC Bank"),
            txn("B", 20.0, TransactionType::Withdrawal, "Gpay", "DBS Bank"),
            txn("C", 5.0, TransactionType::Deposit, "Gpay", "OCBC Bank"),
        ];
        let report = build_summary(&[], &transactions, 1, 50);
        assert_eq!(report.bank_breakdown.len(), 2);
        let ocbc = &report.bank_breakdown[0];
        assert_eq!(ocbc.bank_name, "OCBC Bank");
        assert_eq!(ocbc.transaction_count, 2);
        assert_eq!(ocbc.withdrawal_amount, "$10.00");
        assert_eq!(ocbc.deposit_amount, "$5.00");
    }

    #[test]
    fn test_file_details_report_failures_with_notes() {
        let mut failed = doc("mystery.pdf", "unsupported", vec![]);
        failed.extraction_errors =
            vec!["mystery.pdf: no supported bank format detected".to_string()];
        let documents = vec![
            doc("good.pdf", "DBS Bank", vec![txn(
                "A",
                1.0,
                TransactionType::Withdrawal,
                "Other",
                "DBS Bank",
            )]),
            failed,
        ];
        let report = build_summary(&documents, &[], 1, 50);
        assert_eq!(report.file_details[0].status, "Success");
        assert_eq!(report.file_details[1].status, "Failed");
        assert!(report.file_details[1].notes.contains("no supported bank format"));
        assert_eq!(report.file_details[1].transactions, 0);
    }

    #[test]
    fn test_processing_metrics_and_bank_counts() {
        let documents = vec![
            doc("a.pdf", "OCBC Bank", vec![
                txn("A", 1.0, TransactionType::Withdrawal, "Other", "OCBC Bank"),
                txn("B", 2.0, TransactionType::Deposit, "Other", "OCBC Bank"),
            ]),
            doc("b.pdf", "OCBC Bank", vec![txn(
                "C",
                3.0,
                TransactionType::Withdrawal,
                "Other",
                "OCBC Bank",
            )]),
            doc("c.pdf", "DBS Bank", vec![]),
        ];
        let flat: Vec<Transaction> = documents
            .iter()
            .flat_map(|d| d.transactions.iter().cloned())
            .collect();
        let report = build_summary(&documents, &flat, 2, 2);

        assert_eq!(report.processing[0].value, "3"); // files
        assert_eq!(report.processing[1].value, "3"); // transactions
        assert_eq!(report.processing[2].value, "2"); // batches
        assert_eq!(report.processing[3].value, "2"); // batch size

        assert_eq!(report.bank_summary.len(), 2);
        assert_eq!(report.bank_summary[0].bank, "OCBC Bank");
        assert_eq!(report.bank_summary[0].file_count, 2);
        assert_eq!(report.bank_summary[0].transaction_count, 3);
        assert_eq!(report.bank_summary[1].bank, "DBS Bank");
        assert_eq!(report.bank_summary[1].transaction_count, 0);
    }

    #[test]
    fn test_category_counts_cover_every_transaction() {
        let transactions = vec![
            txn("A", 1.0, TransactionType::Withdrawal, "Adyen", "OCBC Bank"),
            txn("B", 2.0, TransactionType::Deposit, "Other", "OCBC Bank"),
            txn("C", 3.0, TransactionType::Withdrawal, "Adyen", "DBS Bank"),
        ];
        let report = build_summary(&[], &transactions, 1, 50);
        let counted: usize = report.merchant_categories.iter().map(|r| r.total_count).sum();
        assert_eq!(counted, transactions.len());
    }
}
