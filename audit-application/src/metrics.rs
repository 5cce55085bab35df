use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    import_requests: AtomicU64,
    import_rows: AtomicU64,
    import_errors: AtomicU64,
    detection_runs: AtomicU64,
    alerts_created: AtomicU64,
}

impl Metrics {
    pub fn record_import(&self, row_count: usize) {
        self.import_requests.fetch_add(1, Ordering::Relaxed);
        self.import_rows.fetch_add(row_count as u64, Ordering::Relaxed);
    }

    pub fn record_import_error(&self) {
        self.import_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_detection(&self, created: u64) {
        self.detection_runs.fetch_add(1, Ordering::Relaxed);
        self.alerts_created.fetch_add(created, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let import_requests = self.import_requests.load(Ordering::Relaxed);
        let import_rows = self.import_rows.load(Ordering::Relaxed);
        let import_errors = self.import_errors.load(Ordering::Relaxed);
        let detection_runs = self.detection_runs.load(Ordering::Relaxed);
        let alerts_created = self.alerts_created.load(Ordering::Relaxed);

        format!(
            "# TYPE cpgf_import_requests_total counter\n\
cpgf_import_requests_total {}\n\
# TYPE cpgf_import_rows_total counter\n\
cpgf_import_rows_total {}\n\
# TYPE cpgf_import_errors_total counter\n\
cpgf_import_errors_total {}\n\
# TYPE cpgf_detection_runs_total counter\n\
cpgf_detection_runs_total {}\n\
# TYPE cpgf_alerts_created_total counter\n\
cpgf_alerts_created_total {}\n",
            import_requests, import_rows, import_errors, detection_runs, alerts_created
        )
    }
}
