//! Record normalizer: turn a raw CSV table into typed transaction records.
//!
//! Column names are trimmed and lower-cased, a date-like column is renamed to
//! `date`, and `amount` / `category` are derived from `message` when the file
//! does not carry them. Row-level problems fall back to defaults; only
//! structural gaps are reported as issues.

use std::fmt;

use smstrack_core::{Category, DEFAULT_SYMBOL, DateCell, Table, TransactionRecord, categorize};

use crate::parsers::amount::AmountExtractor;
use crate::parsers::date::parse_date;
use crate::types::RawTable;

/// Header names accepted as the date column when no `date` column exists
const DATE_ALIASES: &[&str] = &["datetime", "timestamp", "transaction date", "txn date", "time"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub currency_symbol: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_SYMBOL.to_string(),
        }
    }
}

/// Structural gaps found while normalizing. None of them abort the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeIssue {
    /// No date-like column; date filters and the per-day series are unavailable
    MissingDateColumn,
    /// No amount column and no message to extract from; amounts are 0
    AmountUnavailable,
    /// No category column and no message to classify; categories are Others
    CategoryUnavailable,
}

impl fmt::Display for NormalizeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeIssue::MissingDateColumn => {
                f.write_str("no date column found; date range filtering is disabled")
            }
            NormalizeIssue::AmountUnavailable => {
                f.write_str("no amount or message column found; amounts default to 0")
            }
            NormalizeIssue::CategoryUnavailable => {
                f.write_str("no category or message column found; categories default to Others")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub table: Table,
    pub issues: Vec<NormalizeIssue>,
    /// Rows whose date cell could not be parsed
    pub unknown_dates: usize,
    /// Rows whose amount cell could not be parsed (supplied amount column only)
    pub unparsed_amounts: usize,
}

pub fn normalize(raw: RawTable) -> Normalized {
    normalize_with(raw, &NormalizeOptions::default())
}

pub fn normalize_with(raw: RawTable, opts: &NormalizeOptions) -> Normalized {
    let mut columns: Vec<String> = raw
        .headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect();

    if !columns.iter().any(|c| c == "date") {
        if let Some(idx) = DATE_ALIASES
            .iter()
            .find_map(|alias| columns.iter().position(|c| c == alias))
        {
            tracing::info!(from = %columns[idx], "using column as date");
            columns[idx] = "date".to_string();
        }
    }

    let position = |name: &str| columns.iter().position(|c| c == name);
    let date_idx = position("date");
    let amount_idx = position("amount");
    let category_idx = position("category");
    let message_idx = position("message");
    let location_idx = position("location");
    let payment_idx = position("payment");

    let mut issues = Vec::new();
    if date_idx.is_none() {
        issues.push(NormalizeIssue::MissingDateColumn);
    }
    let derive_amount = amount_idx.is_none() && message_idx.is_some();
    if amount_idx.is_none() && message_idx.is_none() {
        issues.push(NormalizeIssue::AmountUnavailable);
    }
    let derive_category = category_idx.is_none() && message_idx.is_some();
    if category_idx.is_none() && message_idx.is_none() {
        issues.push(NormalizeIssue::CategoryUnavailable);
    }

    // Fall back to the default symbol if the configured one cannot form a pattern.
    let extractor = AmountExtractor::new(&opts.currency_symbol)
        .or_else(|_| AmountExtractor::new(DEFAULT_SYMBOL))
        .ok();

    let width = columns.len();
    if derive_amount {
        columns.push("amount".to_string());
    }
    if derive_category {
        columns.push("category".to_string());
    }

    let mut unknown_dates = 0usize;
    let mut unparsed_amounts = 0usize;
    let mut ragged = 0usize;
    let mut records = Vec::with_capacity(raw.rows.len());

    for mut cells in raw.rows {
        if cells.len() != width {
            ragged += 1;
            cells.resize(width, String::new());
        }

        let cell = |idx: Option<usize>| idx.map(|i| cells[i].as_str());
        let non_empty = |idx: Option<usize>| {
            cell(idx)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };

        let date = match cell(date_idx) {
            Some(s) => parse_date(s),
            None => DateCell::Unknown,
        };
        if date_idx.is_some() && !date.is_known() {
            unknown_dates += 1;
        }

        let message = non_empty(message_idx);

        let amount = match (cell(amount_idx), &extractor) {
            (Some(s), Some(ex)) => ex.parse_cell(s).unwrap_or_else(|| {
                unparsed_amounts += 1;
                0.0
            }),
            (None, Some(ex)) if derive_amount => ex.extract(message.as_deref().unwrap_or("")),
            _ => 0.0,
        };

        let category = match cell(category_idx) {
            Some(s) if s.trim().is_empty() => Category::Others,
            Some(s) => Category::from_label(s.trim()),
            None if derive_category => categorize(message.as_deref().unwrap_or("")),
            None => Category::Others,
        };

        let location = non_empty(location_idx);
        let payment = non_empty(payment_idx);

        if derive_amount {
            cells.push(amount.to_string());
        }
        if derive_category {
            cells.push(category.label().to_string());
        }

        records.push(TransactionRecord {
            date,
            amount,
            category,
            message,
            location,
            payment,
            cells,
        });
    }

    if ragged > 0 {
        tracing::warn!(rows = ragged, columns = width, "rows padded or truncated to header width");
    }
    if unknown_dates > 0 {
        tracing::debug!(rows = unknown_dates, "unparseable dates kept as unknown");
    }
    if unparsed_amounts > 0 {
        tracing::debug!(rows = unparsed_amounts, "unparseable amounts defaulted to 0");
    }
    for issue in &issues {
        tracing::debug!(?issue, "structural gap");
    }
    tracing::info!(
        rows = records.len(),
        derived_amount = derive_amount,
        derived_category = derive_category,
        "normalized table"
    );

    Normalized {
        table: Table::new(columns, records, date_idx.is_some()),
        issues,
        unknown_dates,
        unparsed_amounts,
    }
}
