use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use clickhouse::{Client, Row};
use serde::{Deserialize, Serialize};
use tracing::warn;

use audit_domain::ports::{AlertRepository, TransactionRepository};
use audit_domain::{AlertKind, AlertRow, AlertSummary, Transaction};

#[derive(Clone)]
pub struct ClickhouseRepo {
    client: Client,
    database: String,
}

#[derive(Debug, Row, Serialize, Deserialize)]
struct TransactionDbRow {
    id: String,
    holder_tax_id: String,
    holder_name: String,
    counterparty_tax_id: Option<String>,
    counterparty_name: Option<String>,
    kind: String,
    category: String,
    date: String,
    amount: f64,
    statement_month: u8,
    statement_year: u16,
}

#[derive(Debug, Row, Serialize, Deserialize)]
struct AlertDbRow {
    id: String,
    transaction_id: Option<String>,
    severity: String,
    alert_type: String,
    title: String,
    description: String,
    amount: f64,
    alert_date: String,
    card_holder: String,
    status: String,
    dedup_key: String,
    created_at: i64,
}

impl ClickhouseRepo {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        let create_db = format!("CREATE DATABASE IF NOT EXISTS {}", self.database);
        self.client.query(&create_db).execute().await?;

        let create_transactions = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id String,
    holder_tax_id String,
    holder_name String,
    counterparty_tax_id Nullable(String),
    counterparty_name Nullable(String),
    kind String,
    category String,
    date String,
    amount Float64,
    statement_month UInt8,
    statement_year UInt16
) ENGINE = MergeTree
ORDER BY (date, holder_tax_id)
"#;
        self.client.query(create_transactions).execute().await?;

        // The replacing merge on (alert_type, dedup_key) is the storage-side
        // backstop for the engine's check-then-insert sequence: if two runs
        // ever race past the pre-check, the duplicate collapses on merge.
        let create_alerts = r#"
CREATE TABLE IF NOT EXISTS alerts (
    id String,
    transaction_id Nullable(String),
    severity String,
    alert_type String,
    title String,
    description String,
    amount Float64,
    alert_date String,
    card_holder String,
    status String,
    dedup_key String,
    created_at Int64
) ENGINE = ReplacingMergeTree
ORDER BY (alert_type, dedup_key)
"#;
        self.client.query(create_alerts).execute().await?;
        Ok(())
    }
}

fn to_transaction_row(transaction: &Transaction) -> TransactionDbRow {
    TransactionDbRow {
        id: transaction.id.clone(),
        holder_tax_id: transaction.holder_tax_id.clone(),
        holder_name: transaction.holder_name.clone(),
        counterparty_tax_id: transaction.counterparty_tax_id.clone(),
        counterparty_name: transaction.counterparty_name.clone(),
        kind: transaction.kind.clone(),
        category: transaction.category.as_str().to_string(),
        date: transaction.date.format("%Y-%m-%d").to_string(),
        amount: transaction.amount,
        statement_month: transaction.statement_month,
        statement_year: transaction.statement_year,
    }
}

fn from_transaction_row(row: TransactionDbRow) -> Option<Transaction> {
    let date = match NaiveDate::parse_from_str(&row.date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(err) => {
            warn!("skipping transaction {} with bad date '{}': {}", row.id, row.date, err);
            return None;
        }
    };
    Some(Transaction {
        id: row.id,
        holder_tax_id: row.holder_tax_id,
        holder_name: row.holder_name,
        counterparty_tax_id: row.counterparty_tax_id,
        counterparty_name: row.counterparty_name,
        kind: row.kind,
        category: row.category.as_str().into(),
        date,
        amount: row.amount,
        statement_month: row.statement_month,
        statement_year: row.statement_year,
    })
}

fn to_alert_row(alert: &AlertRow) -> AlertDbRow {
    AlertDbRow {
        id: alert.id.clone(),
        transaction_id: alert.transaction_id.clone(),
        severity: alert.severity.as_str().to_string(),
        alert_type: alert.alert_type.as_str().to_string(),
        title: alert.title.clone(),
        description: alert.description.clone(),
        amount: alert.amount,
        alert_date: alert.alert_date.format("%Y-%m-%d").to_string(),
        card_holder: alert.card_holder.clone(),
        status: alert.status.as_str().to_string(),
        dedup_key: alert.dedup_key.clone(),
        created_at: alert.created_at,
    }
}

fn from_alert_row(row: AlertDbRow) -> Option<AlertRow> {
    let alert_date = match NaiveDate::parse_from_str(&row.alert_date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(err) => {
            warn!("skipping alert {} with bad date '{}': {}", row.id, row.alert_date, err);
            return None;
        }
    };
    let Some(alert_type) = AlertKind::parse(&row.alert_type) else {
        warn!("skipping alert {} with unknown type '{}'", row.id, row.alert_type);
        return None;
    };
    Some(AlertRow {
        id: row.id,
        transaction_id: row.transaction_id,
        severity: row.severity.as_str().into(),
        alert_type,
        title: row.title,
        description: row.description,
        amount: row.amount,
        alert_date,
        card_holder: row.card_holder,
        status: row.status.as_str().into(),
        dedup_key: row.dedup_key,
        created_at: row.created_at,
    })
}

const TRANSACTION_COLUMNS: &str = "id, holder_tax_id, holder_name, counterparty_tax_id, \
counterparty_name, kind, category, date, amount, statement_month, statement_year";

const ALERT_COLUMNS: &str = "id, transaction_id, severity, alert_type, title, description, \
amount, alert_date, card_holder, status, dedup_key, created_at";

#[async_trait]
impl TransactionRepository for ClickhouseRepo {
    async fn ensure_schema(&self) -> Result<()> {
        ClickhouseRepo::ensure_schema(self).await
    }

    async fn insert_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        let mut insert = self.client.insert("transactions")?;
        for transaction in transactions {
            insert.write(&to_transaction_row(transaction)).await?;
        }
        insert.end().await?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Transaction>> {
        let query = format!("SELECT {} FROM transactions", TRANSACTION_COLUMNS);
        let rows = self
            .client
            .query(&query)
            .fetch_all::<TransactionDbRow>()
            .await?;
        Ok(rows.into_iter().filter_map(from_transaction_row).collect())
    }

    async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}

#[async_trait]
impl AlertRepository for ClickhouseRepo {
    async fn alert_exists(&self, alert_type: &str, dedup_key: &str) -> Result<bool> {
        let count: u64 = self
            .client
            .query("SELECT count() FROM alerts WHERE alert_type = ? AND dedup_key = ?")
            .bind(alert_type)
            .bind(dedup_key)
            .fetch_one()
            .await?;
        Ok(count > 0)
    }

    async fn insert_alert(&self, alert: &AlertRow) -> Result<()> {
        let mut insert = self.client.insert("alerts")?;
        insert.write(&to_alert_row(alert)).await?;
        insert.end().await?;
        Ok(())
    }

    async fn fetch_alerts(
        &self,
        date: Option<&str>,
        card_holder: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AlertRow>> {
        let mut sql = format!("SELECT {} FROM alerts WHERE 1 = 1", ALERT_COLUMNS);
        if date.is_some() {
            sql.push_str(" AND alert_date = ?");
        }
        if card_holder.is_some() {
            sql.push_str(" AND card_holder = ?");
        }
        sql.push_str(&format!(" ORDER BY created_at DESC LIMIT {}", limit));

        let mut query = self.client.query(&sql);
        if let Some(date) = date {
            query = query.bind(date);
        }
        if let Some(card_holder) = card_holder {
            query = query.bind(card_holder);
        }
        let rows = query.fetch_all::<AlertDbRow>().await?;
        Ok(rows.into_iter().filter_map(from_alert_row).collect())
    }

    async fn fetch_summary(&self, date: Option<&str>) -> Result<AlertSummary> {
        let mut sql = "SELECT severity, count() AS cnt FROM alerts".to_string();
        if date.is_some() {
            sql.push_str(" WHERE alert_date = ?");
        }
        sql.push_str(" GROUP BY severity");

        let mut query = self.client.query(&sql);
        if let Some(date) = date {
            query = query.bind(date);
        }
        let rows = query.fetch_all::<(String, u64)>().await?;
        let mut summary = AlertSummary::default();
        for (severity, count) in rows {
            match severity.as_str() {
                "high" => summary.high = count,
                "medium" => summary.medium = count,
                "low" => summary.low = count,
                _ => {}
            }
        }
        Ok(summary)
    }
}
