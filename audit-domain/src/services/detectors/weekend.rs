// Weekend transaction rule
// CPGF spend is expected on business days; a sizeable weekend charge is
// worth a reviewer's glance, nothing more, hence the low severity.

use chrono::{Datelike, Weekday};

use crate::entities::AlertCandidate;
use crate::utils::format_brl;
use crate::value_objects::{AlertKind, Severity};

use super::{DetectionContext, Detector};

pub struct WeekendTransaction;

impl Detector for WeekendTransaction {
    fn kind(&self) -> AlertKind {
        AlertKind::WeekendTransaction
    }

    fn scan(&self, ctx: &DetectionContext<'_>) -> Vec<AlertCandidate> {
        ctx.transactions
            .iter()
            .filter(|t| {
                matches!(t.date.weekday(), Weekday::Sat | Weekday::Sun)
                    && t.amount > ctx.config.weekend_amount_threshold
            })
            .map(|t| AlertCandidate {
                transaction_id: Some(t.id.clone()),
                severity: Severity::Low,
                alert_type: AlertKind::WeekendTransaction,
                title: "Transação em Final de Semana".to_string(),
                description: format!(
                    "Transação de {} realizada em final de semana.",
                    format_brl(t.amount)
                ),
                amount: t.amount,
                alert_date: t.date,
                card_holder: t.holder_name.clone(),
                dedup_key: t.id.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{date, txn};
    use super::*;
    use crate::entities::DetectionConfig;

    // 2026-03-07 is a Saturday, 2026-03-09 a Monday.

    #[test]
    fn flags_saturday_above_threshold() {
        let txns = vec![txn("t1", "Carla Dias", "2026-03-07", 501.0)];
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-03-10"),
            config: &config,
        };

        let alerts = WeekendTransaction.scan(&ctx);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Low);
        assert_eq!(alerts[0].dedup_key, "t1");
    }

    #[test]
    fn amount_threshold_is_strict() {
        let txns = vec![txn("t1", "Carla Dias", "2026-03-07", 500.0)];
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-03-10"),
            config: &config,
        };

        assert!(WeekendTransaction.scan(&ctx).is_empty());
    }

    #[test]
    fn weekday_is_not_flagged() {
        let txns = vec![txn("t1", "Carla Dias", "2026-03-09", 800.0)];
        let config = DetectionConfig::default();
        let ctx = DetectionContext {
            transactions: &txns,
            today: date("2026-03-10"),
            config: &config,
        };

        assert!(WeekendTransaction.scan(&ctx).is_empty());
    }
}
