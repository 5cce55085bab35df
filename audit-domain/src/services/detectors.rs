// Detection rules
// Each detector is a pure, synchronous pass over the transaction slice
// loaded for the run. Detectors only emit candidates; the engine owns the
// dedup lookup and the insert, uniformly for every rule.

pub mod benford;
pub mod daily_burst;
pub mod fractionation;
pub mod high_value;
pub mod inactive;
pub mod supplier_concentration;
pub mod weekend;

use chrono::NaiveDate;

use crate::entities::{AlertCandidate, DetectionConfig, Transaction};
use crate::value_objects::AlertKind;

pub struct DetectionContext<'a> {
    pub transactions: &'a [Transaction],
    pub today: NaiveDate,
    pub config: &'a DetectionConfig,
}

pub trait Detector: Send + Sync {
    fn kind(&self) -> AlertKind;
    fn scan(&self, ctx: &DetectionContext<'_>) -> Vec<AlertCandidate>;
}

/// Every detection rule, in the order a run executes them. Order between
/// detectors carries no meaning; candidates are independent.
pub fn all() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(high_value::HighValueWithdrawal),
        Box::new(daily_burst::DailyBurst),
        Box::new(weekend::WeekendTransaction),
        Box::new(fractionation::SuspiciousFractionation),
        Box::new(supplier_concentration::SupplierConcentration),
        Box::new(inactive::InactiveCardholder),
        Box::new(benford::BenfordAnomaly),
    ]
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::NaiveDate;

    use crate::entities::Transaction;
    use crate::value_objects::Category;

    pub(crate) fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date")
    }

    pub(crate) fn txn(id: &str, holder: &str, day: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            holder_tax_id: format!("cpf-{holder}"),
            holder_name: holder.to_string(),
            counterparty_tax_id: None,
            counterparty_name: None,
            kind: "COMPRA".to_string(),
            category: Category::Purchase,
            date: date(day),
            amount,
            statement_month: 1,
            statement_year: 2026,
        }
    }
}
