//! Read expense CSV exports into a raw table and write tables back out.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use smstrack_core::Table;

use crate::error::IngestError;
use crate::types::RawTable;

/// Read a CSV file with a header row.
pub fn read_csv(path: impl AsRef<Path>) -> Result<RawTable, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = read_csv_from(file)?;
    tracing::info!(
        path = %path.display(),
        rows = raw.rows.len(),
        columns = raw.headers.len(),
        "loaded csv"
    );
    Ok(raw)
}

/// Read CSV from any reader. Rows may be ragged; invalid UTF-8 is replaced
/// rather than rejected.
pub fn read_csv_from<R: Read>(reader: R) -> Result<RawTable, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::MissingHeader);
    }

    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let record = result?;
        rows.push(
            record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}

/// Serialize a table as UTF-8 CSV with a header row, in its column order.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), IngestError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.columns)?;
    for record in &table.records {
        wtr.write_record(&record.cells)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_path(table: &Table, path: impl AsRef<Path>) -> Result<(), IngestError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(table, file)?;
    tracing::info!(path = %path.display(), rows = table.len(), "wrote csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn test_reads_headers_and_rows() {
        let data = "Date,Message\n2024-01-01,\"Paid ₹1,234.50 to Amazon\"\n2024-01-02,Swiggy order\n";
        let raw = read_csv_from(data.as_bytes()).unwrap();
        assert_eq!(raw.headers, vec!["Date", "Message"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[0][1], "Paid ₹1,234.50 to Amazon");
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let err = read_csv_from("".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader));
    }

    #[test]
    fn test_header_only_is_an_empty_table() {
        let raw = read_csv_from("date,amount\n".as_bytes()).unwrap();
        assert!(raw.rows.is_empty());
    }

    #[test]
    fn test_write_keeps_layout_and_quotes() {
        let data = "date,message,location\n2024-01-01,\"fuel, ₹300\",Pune\n";
        let table = normalize(read_csv_from(data.as_bytes()).unwrap()).table;

        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "date,message,location,amount,category\n2024-01-01,\"fuel, ₹300\",Pune,300,Fuel\n"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
