use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{error, info, warn};

use audit_domain::detectors;
use audit_domain::{AlertRow, DetectionContext, Severity};

use crate::AppError;
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct DetectionOutcome {
    pub success: bool,
    #[serde(rename = "alertsCreated")]
    pub alerts_created: u64,
    pub message: String,
}

pub async fn run_detection(state: &AppState) -> Result<DetectionOutcome, AppError> {
    run_detection_at(state, Local::now().date_naive()).await
}

/// One detection pass over the whole transaction store. The bulk load is the
/// only fatal store read; a failed dedup lookup or insert skips that
/// candidate and the run keeps going, so a transient error never silences
/// the remaining detectors.
pub async fn run_detection_at(
    state: &AppState,
    today: NaiveDate,
) -> Result<DetectionOutcome, AppError> {
    let transactions = state.transaction_repo.fetch_all().await.map_err(|err| {
        error!("failed to load transactions for detection: {}", err);
        AppError::StoreUnavailable(err)
    })?;
    info!("starting detection run over {} transactions", transactions.len());

    let ctx = DetectionContext {
        transactions: &transactions,
        today,
        config: &state.config.detection,
    };

    let mut created = 0u64;
    let mut new_alerts = Vec::new();
    for detector in detectors::all() {
        let kind = detector.kind().as_str();
        for candidate in detector.scan(&ctx) {
            match state
                .alert_repo
                .alert_exists(kind, &candidate.dedup_key)
                .await
            {
                Ok(true) => continue,
                Ok(false) => {}
                Err(err) => {
                    warn!("dedup lookup failed for {} '{}': {}", kind, candidate.dedup_key, err);
                    continue;
                }
            }
            let row = AlertRow::from_candidate(candidate);
            match state.alert_repo.insert_alert(&row).await {
                Ok(()) => {
                    created += 1;
                    new_alerts.push(row);
                }
                Err(err) => warn!("failed to insert {} alert: {}", kind, err),
            }
        }
    }

    state.metrics.record_detection(created);
    info!("detection run finished, {} alerts created", created);

    let high_severity: Vec<AlertRow> = new_alerts
        .into_iter()
        .filter(|alert| alert.severity == Severity::High)
        .collect();
    if !high_severity.is_empty() {
        state
            .alert_notifier
            .spawn_notifications(state.config.clone(), high_severity);
    }

    Ok(DetectionOutcome {
        success: true,
        alerts_created: created,
        message: format!("Análise concluída. {} alertas criados.", created),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use tokio::sync::Mutex;

    use audit_domain::ports::{AlertNotifier, AlertRepository, TransactionRepository};
    use audit_domain::{
        AlertRow, AlertSummary, Category, DetectionConfig, RuntimeConfig, Transaction,
    };

    use super::*;
    use crate::Metrics;

    struct MemoryTransactions(Vec<Transaction>);

    #[async_trait]
    impl TransactionRepository for MemoryTransactions {
        async fn ensure_schema(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn insert_transactions(&self, _transactions: &[Transaction]) -> anyhow::Result<()> {
            Ok(())
        }

        async fn fetch_all(&self) -> anyhow::Result<Vec<Transaction>> {
            Ok(self.0.clone())
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct UnavailableTransactions;

    #[async_trait]
    impl TransactionRepository for UnavailableTransactions {
        async fn ensure_schema(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn insert_transactions(&self, _transactions: &[Transaction]) -> anyhow::Result<()> {
            Ok(())
        }

        async fn fetch_all(&self) -> anyhow::Result<Vec<Transaction>> {
            anyhow::bail!("connection refused")
        }

        async fn ping(&self) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    #[derive(Default)]
    struct MemoryAlerts {
        rows: Mutex<Vec<AlertRow>>,
        fail_next_insert: AtomicBool,
    }

    #[async_trait]
    impl AlertRepository for MemoryAlerts {
        async fn alert_exists(&self, alert_type: &str, dedup_key: &str) -> anyhow::Result<bool> {
            let rows = self.rows.lock().await;
            Ok(rows
                .iter()
                .any(|row| row.alert_type.as_str() == alert_type && row.dedup_key == dedup_key))
        }

        async fn insert_alert(&self, alert: &AlertRow) -> anyhow::Result<()> {
            if self.fail_next_insert.swap(false, Ordering::SeqCst) {
                anyhow::bail!("simulated insert failure");
            }
            self.rows.lock().await.push(alert.clone());
            Ok(())
        }

        async fn fetch_alerts(
            &self,
            _date: Option<&str>,
            _card_holder: Option<&str>,
            _limit: usize,
        ) -> anyhow::Result<Vec<AlertRow>> {
            Ok(self.rows.lock().await.clone())
        }

        async fn fetch_summary(&self, _date: Option<&str>) -> anyhow::Result<AlertSummary> {
            Ok(AlertSummary::default())
        }
    }

    struct NoopNotifier;

    impl AlertNotifier for NoopNotifier {
        fn spawn_notifications(&self, _config: RuntimeConfig, _alerts: Vec<AlertRow>) {}
    }

    fn runtime_config() -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: None,
            auditor_tokens: Vec::new(),
            alert_webhook_url: None,
            alert_webhook_template: None,
            detect_after_import: false,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 5,
            detection: DetectionConfig::default(),
        }
    }

    fn make_state(transactions: Vec<Transaction>, alerts: Arc<MemoryAlerts>) -> AppState {
        AppState {
            config: runtime_config(),
            transaction_repo: Arc::new(MemoryTransactions(transactions)),
            alert_repo: alerts,
            alert_notifier: Arc::new(NoopNotifier),
            metrics: Arc::new(Metrics::default()),
        }
    }

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date")
    }

    fn transaction(id: &str, holder: &str, date: &str, amount: f64, category: Category) -> Transaction {
        Transaction {
            id: id.to_string(),
            holder_tax_id: format!("cpf-{holder}"),
            holder_name: holder.to_string(),
            counterparty_tax_id: None,
            counterparty_name: None,
            kind: "COMPRA".to_string(),
            category,
            date: day(date),
            amount,
            statement_month: 1,
            statement_year: 2020,
        }
    }

    // 2020-01-06 is a Monday, and well before the dormancy cutoff relative
    // to the fixed "today" used below, so only the intended detectors fire.
    const TODAY: &str = "2026-08-20";

    #[tokio::test]
    async fn second_run_creates_no_new_alerts() {
        let txns = vec![transaction(
            "t1",
            "Ana Souza",
            "2020-01-06",
            2500.0,
            Category::Withdrawal,
        )];
        let alerts = Arc::new(MemoryAlerts::default());
        let state = make_state(txns, alerts.clone());

        let first = run_detection_at(&state, day(TODAY)).await.expect("first run");
        assert_eq!(first.alerts_created, 1);

        let second = run_detection_at(&state, day(TODAY)).await.expect("second run");
        assert_eq!(second.alerts_created, 0);
        assert_eq!(alerts.rows.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn alert_type_and_dedup_key_pairs_stay_unique() {
        // Burst + fractionation on the same day, plus a high-value
        // withdrawal on another day.
        let mut txns: Vec<Transaction> = [300.0, 310.0, 295.0, 305.0, 298.0, 302.0]
            .iter()
            .enumerate()
            .map(|(i, &amount)| {
                transaction(&format!("t{i}"), "Bruno Lima", "2020-01-06", amount, Category::Purchase)
            })
            .collect();
        txns.push(transaction(
            "t9",
            "Bruno Lima",
            "2020-01-07",
            3000.0,
            Category::Withdrawal,
        ));

        let alerts = Arc::new(MemoryAlerts::default());
        let state = make_state(txns, alerts.clone());

        let first = run_detection_at(&state, day(TODAY)).await.expect("first run");
        assert_eq!(first.alerts_created, 3);
        let second = run_detection_at(&state, day(TODAY)).await.expect("second run");
        assert_eq!(second.alerts_created, 0);

        let rows = alerts.rows.lock().await;
        let keys: HashSet<(String, String)> = rows
            .iter()
            .map(|row| (row.alert_type.as_str().to_string(), row.dedup_key.clone()))
            .collect();
        assert_eq!(keys.len(), rows.len());
    }

    #[tokio::test]
    async fn bulk_load_failure_aborts_the_run_as_store_unavailable() {
        let alerts = Arc::new(MemoryAlerts::default());
        let state = AppState {
            config: runtime_config(),
            transaction_repo: Arc::new(UnavailableTransactions),
            alert_repo: alerts.clone(),
            alert_notifier: Arc::new(NoopNotifier),
            metrics: Arc::new(Metrics::default()),
        };

        let err = run_detection_at(&state, day(TODAY))
            .await
            .expect_err("run must abort");
        assert!(matches!(err, AppError::StoreUnavailable(_)));
        assert!(alerts.rows.lock().await.is_empty());
    }

    #[tokio::test]
    async fn insert_failure_skips_candidate_without_aborting_the_run() {
        let txns = vec![
            transaction("t1", "Ana Souza", "2020-01-06", 2500.0, Category::Withdrawal),
            transaction("t2", "Ana Souza", "2020-01-07", 2600.0, Category::Withdrawal),
        ];
        let alerts = Arc::new(MemoryAlerts::default());
        alerts.fail_next_insert.store(true, Ordering::SeqCst);
        let state = make_state(txns, alerts.clone());

        let first = run_detection_at(&state, day(TODAY)).await.expect("first run");
        assert_eq!(first.alerts_created, 1);

        // The skipped candidate is picked up on the next run.
        let second = run_detection_at(&state, day(TODAY)).await.expect("second run");
        assert_eq!(second.alerts_created, 1);
        assert_eq!(alerts.rows.lock().await.len(), 2);
    }
}
