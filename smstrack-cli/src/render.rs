//! Text rendering of summaries, transaction tables and filter options.

use comfy_table::{Cell, Table as TextTable};

use smstrack_core::{Summary, Table, format_money};

pub const NO_MATCHES: &str = "No records match your filters.";

pub fn render_summary(summary: &Summary, symbol: &str, has_dates: bool) -> String {
    let mut out = String::new();

    out.push_str("Summary\n");
    out.push_str(&format!("  Total Spent:  {}\n", format_money(summary.total, symbol)));
    out.push_str(&format!("  Transactions: {}\n\n", summary.count));

    let mut cats = TextTable::new();
    cats.set_header(vec!["Category", "Amount", "%"]);
    for (label, amount) in &summary.by_category {
        let share = summary.category_share(label).unwrap_or(0.0);
        cats.add_row(vec![
            Cell::new(label),
            Cell::new(format_money(*amount, symbol)),
            Cell::new(format!("{share:.1}%")),
        ]);
    }
    out.push_str(&format!("Category Breakdown\n{cats}\n\n"));

    if !has_dates {
        out.push_str("Spending Over Time\n  (no date column)\n");
        return out;
    }

    let mut days = TextTable::new();
    days.set_header(vec!["Date", "Amount"]);
    for (day, amount) in &summary.by_day {
        days.add_row(vec![
            Cell::new(day.format("%Y-%m-%d")),
            Cell::new(format_money(*amount, symbol)),
        ]);
    }
    out.push_str(&format!("Spending Over Time\n{days}\n"));

    if summary.undated_total != 0.0 {
        out.push_str(&format!(
            "  Undated: {}\n",
            format_money(summary.undated_total, symbol)
        ));
    }

    out
}

/// Filtered rows in their column layout, at most `limit` of them.
pub fn render_transactions(table: &Table, limit: usize) -> String {
    let mut text = TextTable::new();
    text.set_header(table.columns.iter().map(Cell::new));
    for record in table.records.iter().take(limit) {
        text.add_row(record.cells.iter().map(Cell::new));
    }

    let mut out = format!("Transactions\n{text}\n");
    if table.len() > limit {
        out.push_str(&format!("  ... {} more (use --limit)\n", table.len() - limit));
    }
    out
}

/// Date bounds and the distinct values each filter accepts.
pub fn render_facets(table: &Table) -> String {
    let mut out = String::new();

    match table.date_bounds() {
        Some((lo, hi)) => out.push_str(&format!("Dates:        {lo} .. {hi}\n")),
        None if table.has_dates => out.push_str("Dates:        (no readable dates)\n"),
        None => out.push_str("Dates:        (no date column)\n"),
    }

    let line = |label: &str, values: Vec<String>| {
        if values.is_empty() {
            format!("{label:<14}-\n")
        } else {
            format!("{label:<14}{}\n", values.join(", "))
        }
    };
    out.push_str(&line("Category:", table.distinct_categories()));
    out.push_str(&line("Location:", table.distinct_locations()));
    out.push_str(&line("Payment Mode:", table.distinct_payment_modes()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use smstrack_core::{Category, DateCell, TransactionRecord, summarize};

    fn table() -> Table {
        let rec = |d: Option<u32>, amount: f64, category: Category, loc: Option<&str>| TransactionRecord {
            date: d
                .map(|d| {
                    DateCell::Known(
                        NaiveDate::from_ymd_opt(2024, 1, d)
                            .unwrap()
                            .and_hms_opt(0, 0, 0)
                            .unwrap(),
                    )
                })
                .unwrap_or(DateCell::Unknown),
            amount,
            category: category.clone(),
            message: None,
            location: loc.map(str::to_string),
            payment: None,
            cells: vec![amount.to_string(), category.to_string()],
        };
        Table::new(
            vec!["amount".into(), "category".into(), "location".into()],
            vec![
                rec(Some(1), 1234.5, Category::Shopping, Some("Mumbai")),
                rec(Some(2), 300.0, Category::Food, None),
                rec(None, 50.0, Category::Food, Some("Pune")),
            ],
            true,
        )
    }

    #[test]
    fn test_summary_text() {
        let t = table();
        let text = render_summary(&summarize(&t), "₹", t.has_dates);
        assert!(text.contains("Total Spent:  ₹1,584.50"));
        assert!(text.contains("Transactions: 3"));
        assert!(text.contains("Shopping"));
        assert!(text.contains("2024-01-02"));
        assert!(text.contains("Undated: ₹50.00"));
    }

    #[test]
    fn test_summary_without_dates() {
        let mut t = table();
        t.has_dates = false;
        let text = render_summary(&summarize(&t), "$", t.has_dates);
        assert!(text.contains("(no date column)"));
        assert!(!text.contains("Undated"));
    }

    #[test]
    fn test_transactions_limit() {
        let text = render_transactions(&table(), 2);
        assert!(text.contains("1234.5"));
        assert!(text.contains("... 1 more"));
    }

    #[test]
    fn test_facets() {
        let text = render_facets(&table());
        assert!(text.contains("2024-01-01 .. 2024-01-02"));
        assert!(text.contains("Shopping, Food"));
        assert!(text.contains("Mumbai, Pune"));
        assert!(text.contains("Payment Mode: -"));
    }
}
