//! ledgersift: multi-bank statement batch processor CLI.
//!
//! Stands in for the presentation layer: reads already-extracted statement
//! text (PDF decoding happens upstream, e.g. `pdftotext`), runs the
//! detection/extraction/aggregation pipeline, and writes CSV reports.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use tracing::info;

use ledgersift_core::MerchantConfig;
use ledgersift_ingest::{SourceDocument, VARIANTS};
use ledgersift_reports::{run, write_run_output, BatchOptions, OutputOptions};

#[derive(Parser, Debug)]
#[command(name = "ledgersift", version, about = "Multi-bank statement batch processor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process extracted statement text files into CSV reports
    Process {
        /// Directory containing extracted statement text (*.txt, one file
        /// per statement, pages separated by form feeds)
        dir: PathBuf,

        /// Maximum documents per batch
        #[arg(long, default_value_t = 50)]
        batch_size: usize,

        /// Statement year for banks whose rows omit it (default: current year)
        #[arg(long)]
        year: Option<i32>,

        /// Merchant category config file (`Category = kw1, kw2` per line)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the CSV output files
        #[arg(long, default_value = "output")]
        out: PathBuf,

        /// Base name for output files (default: Bank_Statement_Analysis)
        #[arg(long)]
        name: Option<String>,

        /// Skip the consolidated master file
        #[arg(long)]
        no_master: bool,

        /// Skip the per-batch files
        #[arg(long)]
        no_batches: bool,

        /// Skip the summary report
        #[arg(long)]
        no_summary: bool,
    },

    /// List supported bank statement formats
    Formats,

    /// Show the active merchant category configuration
    Categories {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Process {
            dir,
            batch_size,
            year,
            config,
            out,
            name,
            no_master,
            no_batches,
            no_summary,
        } => cmd_process(
            dir, batch_size, year, config, out, name, no_master, no_batches, no_summary,
        ),
        Command::Formats => cmd_formats(),
        Command::Categories { config } => cmd_categories(config),
    }
}

fn load_merchant_config(path: Option<PathBuf>) -> Result<MerchantConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading merchant config {}", path.display()))?;
            Ok(MerchantConfig::parse(&text))
        }
        None => Ok(MerchantConfig::default()),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_process(
    dir: PathBuf,
    batch_size: usize,
    year: Option<i32>,
    config: Option<PathBuf>,
    out: PathBuf,
    name: Option<String>,
    no_master: bool,
    no_batches: bool,
    no_summary: bool,
) -> Result<()> {
    let options = BatchOptions {
        batch_size,
        outputs: OutputOptions {
            master: !no_master,
            per_batch: !no_batches,
            summary: !no_summary,
        },
    };
    // Configuration problems abort before any file is read.
    options.validate()?;
    let merchant_config = load_merchant_config(config)?;
    let statement_year = year.unwrap_or_else(|| Local::now().year());

    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();
    if paths.is_empty() {
        bail!("no .txt statement files found in {}", dir.display());
    }

    let mut documents = Vec::with_capacity(paths.len());
    for path in &paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pages: Vec<String> = text.split('\u{0c}').map(str::to_string).collect();
        documents.push(SourceDocument::new(file_name, pages, statement_year));
    }

    info!(files = documents.len(), batch_size, "starting processing run");
    let output = run(&documents, &options, &merchant_config)?;

    for doc in &output.documents {
        let status = if doc.is_supported() { "ok" } else { "unsupported" };
        println!(
            "{}: {} [{}] {} transactions, {} notes",
            doc.file_name,
            doc.bank_name,
            status,
            doc.transactions.len(),
            doc.extraction_errors.len()
        );
        for note in &doc.extraction_errors {
            println!("    {note}");
        }
    }

    let base = name.unwrap_or_else(|| "Bank_Statement_Analysis".to_string());
    let prefix = format!("{}_{}", Local::now().format("%Y-%m-%d"), base);
    let written = write_run_output(&out, &prefix, &output, options.outputs)?;

    let total: usize = output.batches.iter().map(|b| b.transactions.len()).sum();
    println!(
        "\n{} files, {} transactions, {} batches",
        output.documents.len(),
        total,
        output.batches.len()
    );
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_formats() -> Result<()> {
    for spec in VARIANTS {
        println!("{} - {}", spec.bank_name, spec.format_name);
        println!("    account type: {}", spec.account_type);
        println!("    anchors: {}", spec.anchors.join(", "));
    }
    Ok(())
}

fn cmd_categories(config: Option<PathBuf>) -> Result<()> {
    let merchant_config = load_merchant_config(config)?;
    for (category, keywords) in merchant_config.entries() {
        println!("{category} = {}", keywords.join(", "));
    }
    println!("# unmatched descriptions fall back to 'Other'");
    Ok(())
}
