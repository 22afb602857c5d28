use chrono::NaiveDate;
use smstrack_core::{Category, DateRange, Filter, summarize};
use smstrack_ingest::{normalize, read_csv, read_csv_from, write_csv};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sms_export.csv")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_fixture_normalizes() {
    let n = normalize(read_csv(fixture_path()).unwrap());
    let table = &n.table;

    assert!(n.issues.is_empty());
    assert_eq!(table.len(), 7);
    assert_eq!(n.unknown_dates, 1);
    assert_eq!(
        table.columns,
        vec!["date", "message", "location", "payment", "amount", "category"]
    );

    let amounts: Vec<f64> = table.records.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![1234.5, 320.0, 2000.0, 1150.75, 450.0, 0.0, 500.0]);

    let cats: Vec<&Category> = table.records.iter().map(|r| &r.category).collect();
    assert_eq!(
        cats,
        vec![
            &Category::Shopping,
            &Category::Food,
            &Category::Fuel,
            &Category::Utilities,
            &Category::Food,
            &Category::Others,
            &Category::Shopping,
        ]
    );

    assert_eq!(table.date_bounds(), Some((day(2024, 1, 1), day(2024, 1, 4))));
    assert_eq!(table.distinct_locations(), vec!["Mumbai", "Pune"]);
    assert_eq!(table.distinct_payment_modes(), vec!["Card", "UPI", "NetBanking"]);
}

#[test]
fn test_round_trip_preserves_source_cells() {
    let source = std::fs::read_to_string(fixture_path()).unwrap();
    let raw = read_csv_from(source.as_bytes()).unwrap();
    let original_rows = raw.rows.clone();
    let table = normalize(raw).table;

    let mut out = Vec::new();
    write_csv(&table, &mut out).unwrap();
    let reread = read_csv_from(out.as_slice()).unwrap();

    assert_eq!(reread.rows.len(), original_rows.len());
    for (before, after) in original_rows.iter().zip(&reread.rows) {
        assert_eq!(&after[..before.len()], before.as_slice());
    }
}

#[test]
fn test_filter_then_summarize() {
    let table = normalize(read_csv(fixture_path()).unwrap()).table;

    let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 3)).unwrap();
    let filtered = Filter::new()
        .with_date_range(range)
        .with_payment_modes(["Card", "UPI"])
        .apply(&table)
        .unwrap();
    // Unknown-date Zomato row and the Jan 4 row drop out, NetBanking too.
    assert_eq!(filtered.len(), 4);

    let s = summarize(&filtered);
    assert_eq!(s.count, 4);
    assert!(approx(s.total, 1234.5 + 320.0 + 2000.0));
    assert!(approx(s.by_category.values().sum::<f64>(), s.total));
    assert!(approx(s.by_day.values().sum::<f64>(), s.total));
    assert_eq!(s.undated_total, 0.0);
    assert_eq!(s.by_day.len(), 3);
    assert!(approx(s.by_day[&day(2024, 1, 1)], 1554.5));
}

#[test]
fn test_filter_can_empty_the_table() {
    let table = normalize(read_csv(fixture_path()).unwrap()).table;
    let filtered = Filter::new()
        .with_categories(["Travel"])
        .apply(&table)
        .unwrap();
    assert!(filtered.is_empty());

    let s = summarize(&filtered);
    assert_eq!(s.total, 0.0);
    assert_eq!(s.count, 0);
    assert!(s.by_category.is_empty());
    assert!(s.by_day.is_empty());
}
