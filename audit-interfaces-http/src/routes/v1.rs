use axum::Router;

use audit_application::AppState;

use crate::handlers::{detect_handlers, import_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/import/statement",
            axum::routing::post(import_handlers::import_statement),
        )
        .route(
            "/v1/detect/run",
            axum::routing::post(detect_handlers::run_detection),
        )
        .route(
            "/v1/detect/alerts",
            axum::routing::get(detect_handlers::list_alerts),
        )
        .route(
            "/v1/detect/summary",
            axum::routing::get(detect_handlers::alert_summary),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
