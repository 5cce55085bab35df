use async_trait::async_trait;

use crate::entities::{AlertRow, AlertSummary, Transaction};

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    async fn insert_transactions(&self, transactions: &[Transaction]) -> anyhow::Result<()>;
    /// Full scan of the transaction store. The detection engine works over
    /// the complete set visible at invocation time.
    async fn fetch_all(&self) -> anyhow::Result<Vec<Transaction>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Point lookup on the structured dedup key.
    async fn alert_exists(&self, alert_type: &str, dedup_key: &str) -> anyhow::Result<bool>;
    async fn insert_alert(&self, alert: &AlertRow) -> anyhow::Result<()>;
    async fn fetch_alerts(
        &self,
        date: Option<&str>,
        card_holder: Option<&str>,
        limit: usize,
    ) -> anyhow::Result<Vec<AlertRow>>;
    async fn fetch_summary(&self, date: Option<&str>) -> anyhow::Result<AlertSummary>;
}
