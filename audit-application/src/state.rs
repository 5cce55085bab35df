use std::sync::Arc;

use audit_domain::ports::{AlertNotifier, AlertRepository, TransactionRepository};
use audit_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub transaction_repo: Arc<dyn TransactionRepository>,
    pub alert_repo: Arc<dyn AlertRepository>,
    pub alert_notifier: Arc<dyn AlertNotifier>,
    pub metrics: Arc<Metrics>,
}
