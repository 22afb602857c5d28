//! Aggregation over a (filtered) table: totals, per-category and per-day sums.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::Table;

/// Summary statistics. Amounts keep full precision; round only for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: f64,
    pub count: usize,
    /// Category label -> amount, only for labels present in the table
    pub by_category: BTreeMap<String, f64>,
    /// Calendar day -> amount, ascending
    pub by_day: BTreeMap<NaiveDate, f64>,
    /// Amount carried by rows whose date is unknown
    pub undated_total: f64,
}

impl Summary {
    /// Share of the total for one category, in percent
    pub fn category_share(&self, label: &str) -> Option<f64> {
        let amount = self.by_category.get(label)?;
        if self.total == 0.0 {
            return Some(0.0);
        }
        Some(amount / self.total * 100.0)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

pub fn summarize(table: &Table) -> Summary {
    let mut summary = Summary::default();

    for record in &table.records {
        summary.total += record.amount;
        summary.count += 1;

        *summary
            .by_category
            .entry(record.category.label().to_string())
            .or_insert(0.0) += record.amount;

        match record.date.day() {
            Some(day) => *summary.by_day.entry(day).or_insert(0.0) += record.amount,
            None => summary.undated_total += record.amount,
        }
    }

    summary
}
