use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::ExpenseRecord;

const HEADER: [&str; 4] = ["id", "title", "amount", "category"];

pub(crate) struct CsvExporter;

impl CsvExporter {
    /// Write `records` with a header row. Returns how many rows were written.
    pub(crate) fn write_file(path: &Path, records: &[ExpenseRecord]) -> Result<usize> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Self::write(file, records)
    }

    pub(crate) fn write<W: Write>(writer: W, records: &[ExpenseRecord]) -> Result<usize> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(HEADER)
            .context("Failed to write CSV header")?;
        for rec in records {
            let amount = format!("{:.2}", rec.amount);
            wtr.write_record([
                rec.id.as_deref().unwrap_or(""),
                rec.title.as_str(),
                amount.as_str(),
                rec.category_label(),
            ])
            .context("Failed to write CSV record")?;
        }
        wtr.flush().context("Failed to flush CSV output")?;
        Ok(records.len())
    }
}

/// Default export location: `~/finora-export-YYYY-MM.csv`.
pub(crate) fn default_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    let month = chrono::Local::now().format("%Y-%m");
    format!("{home}/finora-export-{month}.csv")
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
