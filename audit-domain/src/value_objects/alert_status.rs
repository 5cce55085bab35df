// Alert review status
// The engine only ever creates Pending rows; transitions belong to the
// review workflow, not to this service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Pending,
    Reviewed,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Pending => "pending",
            AlertStatus::Reviewed => "reviewed",
            AlertStatus::Resolved => "resolved",
        }
    }
}

impl From<&str> for AlertStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "reviewed" => AlertStatus::Reviewed,
            "resolved" => AlertStatus::Resolved,
            _ => AlertStatus::Pending,
        }
    }
}
