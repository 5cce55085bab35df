use serde::Serialize;
use tracing::{error, info};

use audit_domain::{StatementRecord, Transaction};

use crate::commands::detection_commands;
use crate::AppError;
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub inserted: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Persist a parsed statement. Identity is assigned here; the parser only
/// validates and normalizes lines. With `detect_after_import` set, a
/// detection run is spawned in the background once the rows are stored.
pub async fn import_transactions(
    state: &AppState,
    records: Vec<StatementRecord>,
    skipped: usize,
) -> Result<ImportOutcome, AppError> {
    if records.is_empty() {
        return Err(AppError::BadRequest(format!(
            "no valid transactions found in statement ({skipped} lines skipped)"
        )));
    }

    let transactions: Vec<Transaction> = records
        .into_iter()
        .map(Transaction::from_statement)
        .collect();

    if let Err(err) = state
        .transaction_repo
        .insert_transactions(&transactions)
        .await
    {
        state.metrics.record_import_error();
        return Err(AppError::Internal(err));
    }

    let inserted = transactions.len();
    state.metrics.record_import(inserted);
    info!("imported {} transactions ({} lines skipped)", inserted, skipped);

    if state.config.detect_after_import {
        let state = state.clone();
        tokio::spawn(async move {
            match detection_commands::run_detection(&state).await {
                Ok(outcome) => {
                    info!("post-import detection created {} alerts", outcome.alerts_created)
                }
                Err(err) => error!("post-import detection failed: {}", err),
            }
        });
    }

    Ok(ImportOutcome {
        success: true,
        inserted,
        skipped,
        total: inserted + skipped,
    })
}
