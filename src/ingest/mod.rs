//! CSV ingestion and the minimum-data checks applied before any query.

use crate::models::{DataCheckResult, SharePrice};
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

pub const MIN_UNITS: usize = 3;
pub const MIN_DAYS_PER_UNIT: usize = 7;

const RULE_UNITS_MSG: &str = "Data for 3 or more units required.";
const RULE_DAYS_MSG: &str = "Minimum 7 days of data required for each unit.";

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Missing required column '{0}' in CSV header")]
    MissingColumn(&'static str),

    #[error("Row {row}: missing '{column}' field")]
    MissingField { row: usize, column: &'static str },

    #[error("Row {row}: unparseable date '{value}'")]
    BadDate { row: usize, value: String },

    #[error("Row {row}: unparseable price '{value}'")]
    BadPrice { row: usize, value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

// ── Parser ────────────────────────────────────────────────────────────────────

/// Parse raw CSV bytes (header `unitID,date,unitPrice`) into share-price
/// records, in file order. Columns are resolved by header name, so extra
/// columns and reordering are tolerated; a missing column is not.
pub fn parse_share_data(raw: &[u8]) -> Result<Vec<SharePrice>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(raw);

    let headers = reader.headers()?.clone();
    let unit_idx = column_index(&headers, "unitID")?;
    let date_idx = column_index(&headers, "date")?;
    let price_idx = column_index(&headers, "unitPrice")?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        // 1-based line number, accounting for the header line
        let row = i + 2;
        let record = result?;
        records.push(record_to_price(&record, row, unit_idx, date_idx, price_idx)?);
    }

    debug!("Parsed {} share price rows", records.len());
    Ok(records)
}

fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize, ParseError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(ParseError::MissingColumn(name))
}

fn record_to_price(
    record: &StringRecord,
    row: usize,
    unit_idx: usize,
    date_idx: usize,
    price_idx: usize,
) -> Result<SharePrice, ParseError> {
    let unit_id = record
        .get(unit_idx)
        .ok_or(ParseError::MissingField { row, column: "unitID" })?
        .to_string();

    let date_str = record
        .get(date_idx)
        .ok_or(ParseError::MissingField { row, column: "date" })?;
    let date = parse_date(date_str).ok_or_else(|| ParseError::BadDate {
        row,
        value: date_str.to_string(),
    })?;

    let price_str = record
        .get(price_idx)
        .ok_or(ParseError::MissingField { row, column: "unitPrice" })?;
    let unit_price: f64 = price_str.trim().parse().map_err(|_| ParseError::BadPrice {
        row,
        value: price_str.to_string(),
    })?;

    Ok(SharePrice { unit_id, date, unit_price })
}

/// Parse dates: ISO first, then the lenient formats uploads show up with.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%b %d, %Y") {
        return Some(d);
    }

    None
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Run the two business rules over the whole dataset:
/// at least 3 distinct units, and at least 7 rows for every unit.
/// Failing comments are newline-joined, rule order fixed, then trimmed.
pub fn check_minimum_requirements(records: &[SharePrice]) -> DataCheckResult {
    let mut per_unit: HashMap<&str, usize> = HashMap::new();
    for r in records {
        *per_unit.entry(r.unit_id.as_str()).or_insert(0) += 1;
    }

    let mut comments = String::new();

    if per_unit.len() < MIN_UNITS {
        comments.push_str(RULE_UNITS_MSG);
        comments.push('\n');
    }

    // Vacuous when there are no groups at all; the unit-count rule already
    // covers the empty dataset.
    if let Some(min_days) = per_unit.values().copied().min() {
        if min_days < MIN_DAYS_PER_UNIT {
            comments.push_str(RULE_DAYS_MSG);
            comments.push('\n');
        }
    }

    let comments = comments.trim().to_string();
    DataCheckResult { passed: comments.is_empty(), comments }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
