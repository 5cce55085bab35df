use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::error;

use audit_application::commands::import_commands::{self, ImportOutcome};
use audit_application::AppState;

use crate::error::HttpError;
use crate::middleware::{authorize, authorize_auditor, parse_statement};

pub async fn import_statement(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<ImportOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    if !authorize_auditor(&state.config, &headers) {
        return Err(HttpError::Forbidden);
    }

    let (records, skipped) = parse_statement(&headers, &body).map_err(|err| {
        error!("failed to parse statement body: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;

    let outcome = import_commands::import_transactions(&state, records, skipped).await?;
    Ok(Json(outcome))
}
