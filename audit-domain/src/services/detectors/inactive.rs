// Dormant-cardholder reactivation rule
// A card that was silent for the whole dormancy window and then spends again
// deserves review. A holder with no history at all also matches; that is the
// observed reference behavior and is kept as-is.

use std::collections::HashMap;

use chrono::Duration;

use crate::entities::{AlertCandidate, Transaction};
use crate::utils::format_brl;
use crate::value_objects::{AlertKind, Severity};

use super::{DetectionContext, Detector};

pub struct InactiveCardholder;

impl Detector for InactiveCardholder {
    fn kind(&self) -> AlertKind {
        AlertKind::InactiveCardholder
    }

    fn scan(&self, ctx: &DetectionContext<'_>) -> Vec<AlertCandidate> {
        let recent_cutoff = ctx.today - Duration::days(ctx.config.recent_window_days);
        let dormancy_cutoff = ctx.today - Duration::days(ctx.config.dormancy_days);

        let mut by_holder: HashMap<&str, Vec<&Transaction>> = HashMap::new();
        for t in ctx.transactions {
            by_holder.entry(t.holder_tax_id.as_str()).or_default().push(t);
        }

        let mut candidates = Vec::new();
        for history in by_holder.into_values() {
            let representative = history
                .iter()
                .filter(|t| t.date >= recent_cutoff)
                .max_by_key(|t| t.date);
            let Some(recent) = representative else {
                continue;
            };
            if history.iter().any(|t| t.date < dormancy_cutoff) {
                continue;
            }
            candidates.push(AlertCandidate {
                transaction_id: None,
                severity: Severity::Medium,
                alert_type: AlertKind::InactiveCardholder,
                title: "Portador Inativo com Transação Recente".to_string(),
                description: format!(
                    "Portador sem histórico nos últimos {} dias apresentou transação recente de {}.",
                    ctx.config.dormancy_days,
                    format_brl(recent.amount)
                ),
                amount: recent.amount,
                alert_date: recent.date,
                card_holder: recent.holder_name.clone(),
                dedup_key: recent.holder_name.clone(),
            });
        }
        candidates
    }
}
