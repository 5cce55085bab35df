// Transaction entity
// A normalized CPGF statement line. Immutable once imported; the detection
// engine only ever reads these rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::Category;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub holder_tax_id: String,
    pub holder_name: String,
    pub counterparty_tax_id: Option<String>,
    pub counterparty_name: Option<String>,
    pub kind: String,
    pub category: Category,
    pub date: NaiveDate,
    pub amount: f64,
    pub statement_month: u8,
    pub statement_year: u16,
}

/// A validated statement line, before identity assignment. This is the
/// import parser's output contract; the importer turns it into a
/// Transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRecord {
    pub holder_tax_id: String,
    pub holder_name: String,
    pub counterparty_tax_id: Option<String>,
    pub counterparty_name: Option<String>,
    pub kind: String,
    pub category: Category,
    pub date: NaiveDate,
    pub amount: f64,
    pub statement_month: u8,
    pub statement_year: u16,
}

impl Transaction {
    pub fn from_statement(record: StatementRecord) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            holder_tax_id: record.holder_tax_id,
            holder_name: record.holder_name,
            counterparty_tax_id: record.counterparty_tax_id,
            counterparty_name: record.counterparty_name,
            kind: record.kind,
            category: record.category,
            date: record.date,
            amount: record.amount,
            statement_month: record.statement_month,
            statement_year: record.statement_year,
        }
    }
}
