//! Cell-level parsers used during normalization.

pub mod amount;
pub mod date;
