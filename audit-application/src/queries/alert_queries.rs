use tracing::error;

use audit_domain::{AlertQuery, AlertRow, AlertSummary};

use crate::AppError;
use crate::AppState;

const DEFAULT_LIMIT: usize = 200;
const MAX_LIMIT: usize = 1000;

pub async fn list_alerts(state: &AppState, query: AlertQuery) -> Result<Vec<AlertRow>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let rows = state
        .alert_repo
        .fetch_alerts(query.date.as_deref(), query.card_holder.as_deref(), limit)
        .await
        .map_err(|err| {
            error!("failed to fetch alerts: {}", err);
            AppError::StoreUnavailable(err)
        })?;
    Ok(rows)
}

pub async fn alert_summary(
    state: &AppState,
    date: Option<String>,
) -> Result<AlertSummary, AppError> {
    let summary = state
        .alert_repo
        .fetch_summary(date.as_deref())
        .await
        .map_err(|err| {
            error!("failed to fetch alert summary: {}", err);
            AppError::StoreUnavailable(err)
        })?;
    Ok(summary)
}
