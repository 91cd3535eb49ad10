use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::{CategorizedRecord, Category};

#[derive(Debug, Serialize)]
struct CleanRow<'a> {
    date: String,
    merchant_canonical: &'a str,
    amount: f64,
    category: Category,
}

/// Write the cleaned record set as CSV, creating parent directories as needed.
pub fn write_clean_csv(records: &[CategorizedRecord], file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(file_path)?;
    if records.is_empty() {
        wtr.write_record(["date", "merchant_canonical", "amount", "category"])?;
    }
    for r in records {
        wtr.serialize(CleanRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            merchant_canonical: &r.canonical_merchant,
            amount: r.amount,
            category: r.category,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
