// Same-day transaction burst rule

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::entities::AlertCandidate;
use crate::value_objects::{AlertKind, Severity};

use super::{DetectionContext, Detector};

pub struct DailyBurst;

impl Detector for DailyBurst {
    fn kind(&self) -> AlertKind {
        AlertKind::MultipleTransactions
    }

    fn scan(&self, ctx: &DetectionContext<'_>) -> Vec<AlertCandidate> {
        let mut groups: HashMap<(&str, NaiveDate), (usize, &str)> = HashMap::new();
        for t in ctx.transactions {
            let entry = groups
                .entry((t.holder_tax_id.as_str(), t.date))
                .or_insert((0, t.holder_name.as_str()));
            entry.0 += 1;
        }

        groups
            .into_iter()
            .filter(|(_, (count, _))| *count > ctx.config.daily_burst_threshold)
            .map(|((_, date), (count, name))| AlertCandidate {
                transaction_id: None,
                severity: Severity::Medium,
                alert_type: AlertKind::MultipleTransactions,
                title: "Múltiplas Transações no Mesmo Dia".to_string(),
                description: format!("{count} transações realizadas no mesmo dia por {name}."),
                amount: 0.0,
                alert_date: date,
                card_holder: name.to_string(),
                dedup_key: format!("{name}:{date}"),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{date, txn};
    use super::*;
    use crate::entities::DetectionConfig;

    #[test]
    fn flags_more_than_five_same_day() {
        let txns: Vec<_> = (0..6)
            .map(|i| txn(&format!("t{i}"), "Bruno Lima", "2026-04-01", 10.0))
            .collect();
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-04-02"),
            config: &config,
        };

        let alerts = DailyBurst.scan(&ctx);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].amount, 0.0);
        assert!(alerts[0].description.contains("6 transações"));
        assert_eq!(alerts[0].dedup_key, "Bruno Lima:2026-04-01");
    }

    #[test]
    fn exactly_five_is_not_flagged() {
        let txns: Vec<_> = (0..5)
            .map(|i| txn(&format!("t{i}"), "Bruno Lima", "2026-04-01", 10.0))
            .collect();
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-04-02"),
            config: &config,
        };

        assert!(DailyBurst.scan(&ctx).is_empty());
    }

    #[test]
    fn groups_are_per_holder_and_day() {
        let mut txns: Vec<_> = (0..4)
            .map(|i| txn(&format!("a{i}"), "Bruno Lima", "2026-04-01", 10.0))
            .collect();
        txns.extend((0..4).map(|i| txn(&format!("b{i}"), "Carla Dias", "2026-04-01", 10.0)));
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-04-02"),
            config: &config,
        };

        assert!(DailyBurst.scan(&ctx).is_empty());
    }
}
