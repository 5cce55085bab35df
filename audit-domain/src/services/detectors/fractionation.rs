// Suspicious fractionation rule
// Several near-equal amounts on one day with a significant average suggest
// a larger spend split to stay under a per-transaction approval limit.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::entities::{AlertCandidate, Transaction};
use crate::utils::format_brl;
use crate::value_objects::{AlertKind, Severity};

use super::{DetectionContext, Detector};

pub struct SuspiciousFractionation;

impl Detector for SuspiciousFractionation {
    fn kind(&self) -> AlertKind {
        AlertKind::SuspiciousFractionation
    }

    fn scan(&self, ctx: &DetectionContext<'_>) -> Vec<AlertCandidate> {
        let mut groups: HashMap<(&str, NaiveDate), Vec<&Transaction>> = HashMap::new();
        for t in ctx.transactions {
            groups
                .entry((t.holder_tax_id.as_str(), t.date))
                .or_default()
                .push(t);
        }

        let mut candidates = Vec::new();
        for ((_, date), group) in groups {
            if group.len() < ctx.config.fractionation_min_group {
                continue;
            }
            let mut amounts: Vec<f64> = group.iter().map(|t| t.amount).collect();
            amounts.sort_by(|a, b| a.total_cmp(b));
            let spread = amounts[amounts.len() - 1] - amounts[0];
            let total: f64 = amounts.iter().sum();
            let average = total / amounts.len() as f64;

            // Checking the average first also keeps spread/average away
            // from a zero divisor.
            if average > ctx.config.fractionation_min_average
                && spread / average < ctx.config.fractionation_spread_ratio
            {
                let holder = group[0].holder_name.clone();
                candidates.push(AlertCandidate {
                    transaction_id: None,
                    severity: Severity::High,
                    alert_type: AlertKind::SuspiciousFractionation,
                    title: "Fracionamento Suspeito Detectado".to_string(),
                    description: format!(
                        "{} transações de valores similares (média: {}) totalizando {} no mesmo dia.",
                        group.len(),
                        format_brl(average),
                        format_brl(total)
                    ),
                    amount: total,
                    alert_date: date,
                    dedup_key: format!("{holder}:{date}"),
                    card_holder: holder,
                });
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{date, txn};
    use super::*;
    use crate::entities::DetectionConfig;

    #[test]
    fn flags_similar_amounts_same_day() {
        let txns = vec![
            txn("t1", "Davi Rocha", "2026-05-02", 300.0),
            txn("t2", "Davi Rocha", "2026-05-02", 310.0),
            txn("t3", "Davi Rocha", "2026-05-02", 295.0),
        ];
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-05-03"),
            config: &config,
        };

        let alerts = SuspiciousFractionation.scan(&ctx);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].amount, 905.0);
        assert!(alerts[0].description.starts_with("3 transações"));
        assert!(alerts[0].description.contains("R$ 905,00"));
    }

    #[test]
    fn small_average_is_not_flagged() {
        let txns = vec![
            txn("t1", "Davi Rocha", "2026-05-02", 50.0),
            txn("t2", "Davi Rocha", "2026-05-02", 50.0),
            txn("t3", "Davi Rocha", "2026-05-02", 50.0),
        ];
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-05-03"),
            config: &config,
        };

        assert!(SuspiciousFractionation.scan(&ctx).is_empty());
    }

    #[test]
    fn wide_spread_is_not_flagged() {
        let txns = vec![
            txn("t1", "Davi Rocha", "2026-05-02", 210.0),
            txn("t2", "Davi Rocha", "2026-05-02", 400.0),
            txn("t3", "Davi Rocha", "2026-05-02", 800.0),
        ];
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-05-03"),
            config: &config,
        };

        assert!(SuspiciousFractionation.scan(&ctx).is_empty());
    }

    #[test]
    fn needs_at_least_three_transactions() {
        let txns = vec![
            txn("t1", "Davi Rocha", "2026-05-02", 300.0),
            txn("t2", "Davi Rocha", "2026-05-02", 305.0),
        ];
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-05-03"),
            config: &config,
        };

        assert!(SuspiciousFractionation.scan(&ctx).is_empty());
    }
}
