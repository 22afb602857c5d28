//! Filter engine: inclusive date range, then optional value-set filters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::record::{Table, TransactionRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("table has no date column; date range filtering is unavailable")]
    NoDateColumn,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("start date {start} is after end date {end}")]
pub struct DateRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive calendar-day range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Filter selection. Empty value sets mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub date_range: Option<DateRange>,
    pub categories: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub payment_modes: BTreeSet<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_categories<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_locations<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_payment_modes<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_modes.extend(values.into_iter().map(Into::into));
        self
    }

    /// Build the filtered view as a new table.
    ///
    /// Rows with an unknown date never pass a date range.
    pub fn apply(&self, table: &Table) -> Result<Table, FilterError> {
        if self.date_range.is_some() && !table.has_dates {
            return Err(FilterError::NoDateColumn);
        }

        let records: Vec<TransactionRecord> = table
            .records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        tracing::debug!(
            kept = records.len(),
            total = table.len(),
            "applied filter"
        );

        Ok(table.with_records(records))
    }

    fn matches(&self, record: &TransactionRecord) -> bool {
        if let Some(range) = &self.date_range {
            match record.date.day() {
                Some(day) if range.contains(day) => {}
                _ => return false,
            }
        }

        in_set(&self.categories, Some(record.category.label()))
            && in_set(&self.locations, record.location.as_deref())
            && in_set(&self.payment_modes, record.payment.as_deref())
    }
}

fn in_set(set: &BTreeSet<String>, value: Option<&str>) -> bool {
    if set.is_empty() {
        return true;
    }
    value.is_some_and(|v| set.contains(v))
}
