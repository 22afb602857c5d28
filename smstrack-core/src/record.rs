//! Transaction record types shared by the loader, filter and aggregator

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spending categories. The closed set is what the classifier can emit;
/// `Custom` carries labels that were already present in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Shopping,
    Food,
    Fuel,
    Utilities,
    Others,
    Custom(String),
}

impl Category {
    /// Map a source label to a category. Known names match exactly,
    /// anything else is kept verbatim.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Shopping" => Category::Shopping,
            "Food" => Category::Food,
            "Fuel" => Category::Fuel,
            "Utilities" => Category::Utilities,
            "Others" => Category::Others,
            other => Category::Custom(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Shopping => "Shopping",
            Category::Food => "Food",
            Category::Fuel => "Fuel",
            Category::Utilities => "Utilities",
            Category::Others => "Others",
            Category::Custom(s) => s,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A parsed date cell. Rows whose date could not be read are kept as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DateCell {
    Unknown,
    Known(NaiveDateTime),
}

impl DateCell {
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            DateCell::Known(dt) => Some(dt.date()),
            DateCell::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, DateCell::Known(_))
    }
}

/// One normalized row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: DateCell,
    /// Currency-agnostic amount; 0 when it could not be read
    pub amount: f64,
    pub category: Category,
    /// Original free-text source, when the file had a message column
    pub message: Option<String>,
    pub location: Option<String>,
    pub payment: Option<String>,
    /// Textual cells aligned with `Table::columns`
    pub cells: Vec<String>,
}

/// A normalized, read-only table. Filtering produces new tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub records: Vec<TransactionRecord>,
    /// False when the source had no date-like column at all
    pub has_dates: bool,
}

impl Table {
    pub fn new(columns: Vec<String>, records: Vec<TransactionRecord>, has_dates: bool) -> Self {
        Self {
            columns,
            records,
            has_dates,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Same columns, different rows
    pub fn with_records(&self, records: Vec<TransactionRecord>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
            has_dates: self.has_dates,
        }
    }

    /// Earliest and latest known calendar day
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut days = self.records.iter().filter_map(|r| r.date.day());
        let first = days.next()?;
        Some(days.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn distinct_categories(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| Some(r.category.label())))
    }

    pub fn distinct_locations(&self) -> Vec<String> {
        if !self.has_column("location") {
            return Vec::new();
        }
        distinct(self.records.iter().map(|r| r.location.as_deref()))
    }

    pub fn distinct_payment_modes(&self) -> Vec<String> {
        if !self.has_column("payment") {
            return Vec::new();
        }
        distinct(self.records.iter().map(|r| r.payment.as_deref()))
    }
}

// Unique values in first-appearance order, skipping blanks.
fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values.flatten() {
        if v.is_empty() || out.iter().any(|seen| seen == v) {
            continue;
        }
        out.push(v.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(day: Option<(i32, u32, u32)>, category: Category, location: Option<&str>) -> TransactionRecord {
        let date = match day {
            Some((y, m, d)) => DateCell::Known(
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            ),
            None => DateCell::Unknown,
        };
        TransactionRecord {
            date,
            amount: 1.0,
            category,
            message: None,
            location: location.map(str::to_string),
            payment: None,
            cells: Vec::new(),
        }
    }

    #[test]
    fn test_category_labels_round_trip() {
        for label in ["Shopping", "Food", "Fuel", "Utilities", "Others"] {
            assert_eq!(Category::from_label(label).label(), label);
        }
        assert_eq!(
            Category::from_label("Rent"),
            Category::Custom("Rent".to_string())
        );
        // Case matters for source labels
        assert_eq!(
            Category::from_label("food"),
            Category::Custom("food".to_string())
        );
    }

    #[test]
    fn test_date_bounds_skip_unknown() {
        let table = Table::new(
            vec!["date".into()],
            vec![
                rec(Some((2024, 3, 5)), Category::Food, None),
                rec(None, Category::Food, None),
                rec(Some((2024, 1, 9)), Category::Food, None),
            ],
            true,
        );
        let (lo, hi) = table.date_bounds().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_date_bounds_none_when_all_unknown() {
        let table = Table::new(vec![], vec![rec(None, Category::Others, None)], true);
        assert!(table.date_bounds().is_none());
    }

    #[test]
    fn test_distinct_values_keep_first_appearance_order() {
        let table = Table::new(
            vec!["location".into()],
            vec![
                rec(None, Category::Fuel, Some("Pune")),
                rec(None, Category::Food, Some("Mumbai")),
                rec(None, Category::Fuel, None),
                rec(None, Category::Food, Some("Pune")),
            ],
            false,
        );
        assert_eq!(table.distinct_categories(), vec!["Fuel", "Food"]);
        assert_eq!(table.distinct_locations(), vec!["Pune", "Mumbai"]);
        assert!(table.distinct_payment_modes().is_empty());
    }
}
