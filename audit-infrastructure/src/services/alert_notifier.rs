use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tracing::warn;

use audit_domain::ports::AlertNotifier;
use audit_domain::{format_brl, AlertRow, RuntimeConfig};

const DEFAULT_TEMPLATE: &str = r#"{"message":"CPGF: {total} novos alertas\n{lines}"}"#;
const MAX_LINES: usize = 8;

/// Pushes freshly created alerts to a configured HTTP webhook. Delivery runs
/// on a detached task so a slow or dead webhook never stalls a detection run.
#[derive(Default)]
pub struct WebhookAlertNotifier;

impl WebhookAlertNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl AlertNotifier for WebhookAlertNotifier {
    fn spawn_notifications(&self, config: RuntimeConfig, alerts: Vec<AlertRow>) {
        if alerts.is_empty() || config.alert_webhook_url.is_none() {
            return;
        }
        tokio::spawn(async move {
            if let Err(err) = send_webhook(&config, &alerts).await {
                warn!("alert webhook failed: {}", err);
            }
        });
    }
}

async fn send_webhook(config: &RuntimeConfig, alerts: &[AlertRow]) -> Result<()> {
    let url = config
        .alert_webhook_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("alert webhook url not configured"))?;
    let template = config
        .alert_webhook_template
        .as_deref()
        .unwrap_or(DEFAULT_TEMPLATE);

    let payload = build_payload(alerts, template);
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
        .build()?;

    client
        .post(url)
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

fn build_payload(alerts: &[AlertRow], template: &str) -> String {
    let lines = alerts
        .iter()
        .take(MAX_LINES)
        .map(|row| format!("{} | {} | {}", row.title, row.card_holder, format_brl(row.amount)))
        .collect::<Vec<_>>();
    let mut line_text = lines.join("\\n");
    if alerts.len() > MAX_LINES {
        line_text.push_str(&format!("\\n...e mais {} alertas", alerts.len() - MAX_LINES));
    }
    template
        .replace("{total}", &alerts.len().to_string())
        .replace("{lines}", &line_text)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use audit_domain::{AlertKind, AlertStatus, Severity};

    use super::*;

    fn alert(title: &str, holder: &str, amount: f64) -> AlertRow {
        AlertRow {
            id: "a1".to_string(),
            transaction_id: None,
            severity: Severity::High,
            alert_type: AlertKind::HighValueWithdrawal,
            title: title.to_string(),
            description: String::new(),
            amount,
            alert_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            card_holder: holder.to_string(),
            status: AlertStatus::Pending,
            dedup_key: "k".to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn payload_fills_total_and_lines() {
        let alerts = vec![alert("Transação de alto valor", "MARIA SILVA", 2500.0)];
        let payload = build_payload(&alerts, DEFAULT_TEMPLATE);
        assert!(payload.contains("CPGF: 1 novos alertas"));
        assert!(payload.contains("Transação de alto valor | MARIA SILVA | R$ 2.500,00"));
    }

    #[test]
    fn payload_truncates_long_lists() {
        let alerts: Vec<AlertRow> = (0..11)
            .map(|i| alert("Saque em espécie", &format!("HOLDER {}", i), 100.0))
            .collect();
        let payload = build_payload(&alerts, "{total}|{lines}");
        assert!(payload.starts_with("11|"));
        assert!(payload.ends_with("...e mais 3 alertas"));
    }
}
