//! smstrack-core: transaction types, category rules, filtering and aggregation

pub mod auth;
pub mod categorizer;
pub mod filter;
pub mod money;
pub mod record;
pub mod summary;

pub use auth::{CredentialVerifier, StaticCredentials, hash_password};
pub use categorizer::categorize;
pub use filter::{DateRange, DateRangeError, Filter, FilterError};
pub use money::{DEFAULT_SYMBOL, format_money};
pub use record::{Category, DateCell, Table, TransactionRecord};
pub use summary::{Summary, summarize};
