//! CSV rendering of the run's datasets.
//!
//! Master and per-batch tables share one fixed column order; the summary
//! report becomes one CSV per sub-table, named after its sheet.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ledgersift_core::Transaction;
use serde::Serialize;
use tracing::info;

use crate::batch::{OutputOptions, RunOutput};
use crate::summary::SummaryReport;

/// Column order of master and per-batch tables. Fixed; consumers rely on it.
pub const TRANSACTION_COLUMNS: [&str; 11] = [
    "Transaction_Date",
    "Value_Date",
    "Description",
    "Withdrawal",
    "Deposit",
    "Balance",
    "Merchant_Category",
    "Transaction_Type",
    "Source_File",
    "Bank_Name",
    "Account_Type",
];

fn amount_cell(amount: Option<f64>) -> String {
    amount.map(|a| format!("{a:.2}")).unwrap_or_default()
}

/// Render transactions as CSV with the fixed column order.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(TRANSACTION_COLUMNS)?;
    for t in transactions {
        wtr.write_record(&[
            t.transaction_date.format("%Y-%m-%d").to_string(),
            t.value_date.format("%Y-%m-%d").to_string(),
            t.description.clone(),
            amount_cell(t.withdrawal),
            amount_cell(t.deposit),
            amount_cell(t.balance),
            t.merchant_category.clone(),
            t.transaction_type.to_string(),
            t.source_file.clone(),
            t.bank_name.clone(),
            t.account_type.clone(),
        ])?;
    }
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

fn rows_to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

/// Write the summary report as one CSV per sheet, returning the paths.
pub fn write_summary_csvs(
    dir: &Path,
    prefix: &str,
    report: &SummaryReport,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let sheets: [(&str, String); 5] = [
        ("Processing_Summary", rows_to_csv(&report.processing)?),
        ("Bank_Summary", rows_to_csv(&report.bank_summary)?),
        ("File_Details", rows_to_csv(&report.file_details)?),
        (
            "Merchant_Category_Summary",
            rows_to_csv(&report.merchant_categories)?,
        ),
        ("Bank_Breakdown", rows_to_csv(&report.bank_breakdown)?),
    ];
    for (sheet, contents) in sheets {
        let path = dir.join(format!("{prefix}_Summary_Report_{sheet}.csv"));
        write_file(&path, &contents)?;
        written.push(path);
    }
    Ok(written)
}

/// Write every requested dataset under `dir`, returning the files created.
pub fn write_run_output(
    dir: &Path,
    prefix: &str,
    output: &RunOutput,
    outputs: OutputOptions,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = Vec::new();

    if let Some(master) = output.master.as_deref() {
        let path = dir.join(format!("{prefix}_Master_Data.csv"));
        write_file(&path, &transactions_to_csv(master)?)?;
        written.push(path);
    }

    if outputs.per_batch {
        for batch in &output.batches {
            let path = dir.join(format!(
                "{prefix}_Batch_{:02}_of_{:02}.csv",
                batch.index, batch.total
            ));
            write_file(&path, &transactions_to_csv(&batch.transactions)?)?;
            written.push(path);
        }
    }

    if let Some(summary) = output.summary.as_ref() {
        written.extend(write_summary_csvs(dir, prefix, summary)?);
    }

    info!(files = written.len(), dir = %dir.display(), "output files written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgersift_core::TransactionType;

    fn txn() -> Transaction {
        let mut t = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            "PAYMENT /TRANSFER OTHR S$ MUHAMMAD".to_string(),
            650.47,
            TransactionType::Deposit,
            Some(1204.10),
        )
        .with_provenance("ocbc_june.pdf", "OCBC Bank", "Business Growth Account");
        t.merchant_category = "Other".to_string();
        t
    }

    #[test]
    fn test_transaction_csv_has_fixed_columns() {
        let csv = transactions_to_csv(&[txn()]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Transaction_Date,Value_Date,Description,Withdrawal,Deposit,Balance,\
             Merchant_Category,Transaction_Type,Source_File,Bank_Name,Account_Type"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("2025-06-01,2025-06-02,PAYMENT /TRANSFER OTHR S$ MUHAMMAD"));
        assert!(row.contains(",650.47,1204.10,Other,Deposit,"));
        // Withdrawal cell is empty for a deposit.
        assert!(row.contains("MUHAMMAD,,650.47"));
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let csv = transactions_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Transaction_Date,"));
    }

    #[test]
    fn test_summary_rows_serialize_with_sheet_headers() {
        use crate::summary::MetricRow;
        let csv = rows_to_csv(&[MetricRow {
            metric: "Total Transactions".to_string(),
            value: "3".to_string(),
        }])
        .unwrap();
        assert_eq!(csv, "Metric,Value\nTotal Transactions,3\n");
    }
}
