// Alert kind value object
// Fixed tag identifying which detector produced an alert. The string forms
// are part of the stored data contract and must stay stable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HighValueWithdrawal,
    MultipleTransactions,
    WeekendTransaction,
    SuspiciousFractionation,
    SupplierConcentration,
    InactiveCardholder,
    BenfordAnomaly,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::HighValueWithdrawal => "high_value_withdrawal",
            AlertKind::MultipleTransactions => "multiple_transactions",
            AlertKind::WeekendTransaction => "weekend_transaction",
            AlertKind::SuspiciousFractionation => "suspicious_fractionation",
            AlertKind::SupplierConcentration => "supplier_concentration",
            AlertKind::InactiveCardholder => "inactive_cardholder",
            AlertKind::BenfordAnomaly => "benford_anomaly",
        }
    }
}

impl AlertKind {
    /// Reverse of `as_str`. An unknown tag is a corrupted row, not a
    /// detector: callers must skip it rather than relabel it.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high_value_withdrawal" => Some(AlertKind::HighValueWithdrawal),
            "multiple_transactions" => Some(AlertKind::MultipleTransactions),
            "weekend_transaction" => Some(AlertKind::WeekendTransaction),
            "suspicious_fractionation" => Some(AlertKind::SuspiciousFractionation),
            "supplier_concentration" => Some(AlertKind::SupplierConcentration),
            "inactive_cardholder" => Some(AlertKind::InactiveCardholder),
            "benford_anomaly" => Some(AlertKind::BenfordAnomaly),
            _ => None,
        }
    }
}
