use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use audit_application::commands::detection_commands::{self, DetectionOutcome};
use audit_application::queries::alert_queries;
use audit_application::AppState;
use audit_domain::{AlertQuery, AlertRow, AlertSummary};

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(serde::Deserialize)]
pub struct SummaryQuery {
    pub date: Option<String>,
}

pub async fn run_detection(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DetectionOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let outcome = detection_commands::run_detection(&state).await?;
    Ok(Json(outcome))
}

pub async fn list_alerts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AlertQuery>,
) -> Result<Json<Vec<AlertRow>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let rows = alert_queries::list_alerts(&state, query).await?;
    Ok(Json(rows))
}

pub async fn alert_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<AlertSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let summary = alert_queries::alert_summary(&state, query.date).await?;
    Ok(Json(summary))
}
