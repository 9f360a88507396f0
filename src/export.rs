//! Exportação tabular das transações extraídas (CSV).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::StatementResult;
use crate::parsers::prelude::*;
use crate::types::Transaction;

/// Linha do CSV de saída, colunas na ordem do extrato original
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Type")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: Decimal,
    #[serde(rename = "Description")]
    description: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        CsvRow {
            date: &txn.date,
            category: txn.category.as_str(),
            amount: txn.amount,
            description: &txn.description,
        }
    }
}

const CSV_HEADER: [&str; 4] = ["Date", "Type", "Amount", "Description"];

/// Write transactions as CSV rows. The header row is always written, even
/// for an empty transaction list.
pub fn write_csv<W: io::Write>(transactions: &[Transaction], writer: W) -> StatementResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    write_rows(&mut wtr, transactions)?;
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write transactions as a CSV file at `path`.
pub fn write_csv_path(
    transactions: &[Transaction],
    path: impl AsRef<Path>,
) -> StatementResult<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record(CSV_HEADER)?;
    write_rows(&mut wtr, transactions)?;
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn write_rows<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    transactions: &[Transaction],
) -> Result<(), csv::Error> {
    for txn in transactions {
        wtr.serialize(CsvRow::from(txn))?;
    }
    Ok(())
}

/// Parse every statement text file in `dir` (named the way the bank's
/// download names them, e.g. `Statement_Jan_24_2024.txt`) and write all
/// transactions to a single CSV at `output`.
///
/// A file that fails to read or parse is logged and skipped; the remaining
/// statements are still processed. Returns the number of exported rows.
pub fn export_directory(
    dir: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> StatementResult<usize> {
    let mut statements: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| PncParser::is_supported(Some(name), ""))
        })
        .collect();
    statements.sort();

    if statements.is_empty() {
        warn!("Could not find any PNC statements. Ensure they are named Statement_Mmm_DD_YYYY.txt");
        return Ok(0);
    }

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(output)?;
    wtr.write_record(CSV_HEADER)?;
    let mut exported = 0usize;

    for path in statements {
        info!("Processing {}...", path.display());
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                continue;
            }
        };

        let parsed = match PncParser::parse(&content) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Failed to parse {}: {e}", path.display());
                continue;
            }
        };

        let transactions: Result<Vec<Transaction>, _> =
            parsed.into_iter().map(Transaction::try_from).collect();
        let transactions = match transactions {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!("Failed to convert {}: {e}", path.display());
                continue;
            }
        };

        if transactions.is_empty() {
            warn!("No transactions found in {}!", path.display());
            continue;
        }

        write_rows(&mut wtr, &transactions)?;
        exported += transactions.len();
        info!("Finished processing {}.", path.display());
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(exported)
}
