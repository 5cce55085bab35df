pub mod alert;
pub mod config;
pub mod query;
pub mod transaction;

pub use alert::{AlertCandidate, AlertRow, AlertSummary};
pub use config::{DbConfig, DetectionConfig, RuntimeConfig};
pub use query::AlertQuery;
pub use transaction::{StatementRecord, Transaction};
