// High-value withdrawal rule
// Cash withdrawals above the policy threshold bypass the paper trail a
// merchant purchase leaves, so each one gets its own alert.

use crate::entities::AlertCandidate;
use crate::utils::format_brl;
use crate::value_objects::{AlertKind, Category, Severity};

use super::{DetectionContext, Detector};

pub struct HighValueWithdrawal;

impl Detector for HighValueWithdrawal {
    fn kind(&self) -> AlertKind {
        AlertKind::HighValueWithdrawal
    }

    fn scan(&self, ctx: &DetectionContext<'_>) -> Vec<AlertCandidate> {
        ctx.transactions
            .iter()
            .filter(|t| {
                t.category == Category::Withdrawal && t.amount > ctx.config.high_value_threshold
            })
            .map(|t| AlertCandidate {
                transaction_id: Some(t.id.clone()),
                severity: Severity::High,
                alert_type: AlertKind::HighValueWithdrawal,
                title: "Saque de Alto Valor".to_string(),
                description: format!("Saque de {} detectado.", format_brl(t.amount)),
                amount: t.amount,
                alert_date: t.date,
                card_holder: t.holder_name.clone(),
                dedup_key: t.id.clone(),
            })
            .collect()
    }
}
