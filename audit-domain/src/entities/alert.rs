// Alert entities
// An AlertCandidate is what a detector emits; an AlertRow is what the engine
// persists after the dedup pre-check. The dedup_key column is matched by
// equality: the engine never stores two rows with the same
// (alert_type, dedup_key) pair.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::current_millis;
use crate::value_objects::{AlertKind, AlertStatus, Severity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertCandidate {
    pub transaction_id: Option<String>,
    pub severity: Severity,
    pub alert_type: AlertKind,
    pub title: String,
    pub description: String,
    pub amount: f64,
    pub alert_date: NaiveDate,
    pub card_holder: String,
    pub dedup_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRow {
    pub id: String,
    pub transaction_id: Option<String>,
    pub severity: Severity,
    pub alert_type: AlertKind,
    pub title: String,
    pub description: String,
    pub amount: f64,
    pub alert_date: NaiveDate,
    pub card_holder: String,
    pub status: AlertStatus,
    pub dedup_key: String,
    pub created_at: i64,
}

impl AlertRow {
    pub fn from_candidate(candidate: AlertCandidate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            transaction_id: candidate.transaction_id,
            severity: candidate.severity,
            alert_type: candidate.alert_type,
            title: candidate.title,
            description: candidate.description,
            amount: candidate.amount,
            alert_date: candidate.alert_date,
            card_holder: candidate.card_holder,
            status: AlertStatus::Pending,
            dedup_key: candidate.dedup_key,
            created_at: current_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AlertSummary {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}
