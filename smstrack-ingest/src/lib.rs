//! smstrack-ingest: CSV loading and export, amount/date parsers, and the record normalizer.

pub mod csv_io;
pub mod error;
pub mod normalize;
pub mod parsers;
pub mod types;

pub use csv_io::{read_csv, read_csv_from, write_csv, write_csv_path};
pub use error::IngestError;
pub use normalize::{NormalizeIssue, NormalizeOptions, Normalized, normalize, normalize_with};
pub use parsers::amount::{AmountExtractor, extract_amount};
pub use parsers::date::parse_date;
pub use types::RawTable;
