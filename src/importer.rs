use std::path::Path;

use tracing::{debug, warn};

use crate::amounts::{normalize_amount, AmountError};
use crate::dates::{normalize_date, DateError};
use crate::error::{Result, SiftError};
use crate::models::{NormalizedRecord, RawRecord};

pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "merchant", "amount"];

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read the `date`, `merchant` and `amount` columns of a transaction CSV.
///
/// Column names are matched exactly (after trimming and dropping a UTF-8
/// BOM); other columns are ignored. Cells are returned untouched, with
/// missing cells on short rows read as empty strings.
pub fn read_transactions(file_path: &Path) -> Result<Vec<RawRecord>> {
    let display = file_path.display().to_string();
    if !file_path.is_file() {
        return Err(SiftError::FileNotFound(display));
    }

    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_string()
        })
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SiftError::EmptyFile(display));
    }

    let positions: Vec<Option<usize>> = REQUIRED_COLUMNS
        .iter()
        .map(|name| headers.iter().position(|h| h == name))
        .collect();
    let [Some(idx_date), Some(idx_merchant), Some(idx_amount)] = positions[..] else {
        let missing = REQUIRED_COLUMNS
            .iter()
            .zip(&positions)
            .filter(|(_, pos)| pos.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        return Err(SiftError::MissingColumns(missing));
    };

    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let record = result?;
        let line = record.position().map_or(rows.len() + 2, |p| p.line() as usize);
        let cell = |idx: usize| {
            record
                .get(idx)
                .map(|v| String::from_utf8_lossy(v).into_owned())
                .unwrap_or_default()
        };
        rows.push(RawRecord {
            line,
            date: cell(idx_date),
            merchant: cell(idx_merchant),
            amount: cell(idx_amount),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Normalizing
// ---------------------------------------------------------------------------

/// A row excluded from the normalized set, with whichever parses failed.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    pub line: usize,
    pub date_error: Option<DateError>,
    pub amount_error: Option<AmountError>,
}

#[derive(Debug, Default)]
pub struct NormalizeResult {
    pub records: Vec<NormalizedRecord>,
    pub dropped: Vec<DroppedRow>,
}

pub fn normalize_record(raw: RawRecord) -> std::result::Result<NormalizedRecord, DroppedRow> {
    match (normalize_date(&raw.date), normalize_amount(&raw.amount)) {
        (Ok(date), Ok(amount)) => Ok(NormalizedRecord {
            date,
            merchant: raw.merchant,
            amount,
        }),
        (date, amount) => Err(DroppedRow {
            line: raw.line,
            date_error: date.err(),
            amount_error: amount.err(),
        }),
    }
}

/// Normalize every row, keeping the ones whose date and amount both parse.
/// A row failing both checks is still dropped (and counted) once.
pub fn normalize_records(raw: Vec<RawRecord>) -> NormalizeResult {
    let mut result = NormalizeResult::default();
    for row in raw {
        match normalize_record(row) {
            Ok(record) => result.records.push(record),
            Err(dropped) => {
                debug!(
                    line = dropped.line,
                    date_error = ?dropped.date_error,
                    amount_error = ?dropped.amount_error,
                    "dropping row"
                );
                result.dropped.push(dropped);
            }
        }
    }
    if !result.dropped.is_empty() {
        warn!(
            dropped = result.dropped.len(),
            "Dropped {} row(s) with invalid date or amount",
            result.dropped.len()
        );
    }
    result
}
