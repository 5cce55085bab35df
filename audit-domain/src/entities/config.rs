// Runtime configuration entities
// RuntimeConfig is what the application and interface layers see; DbConfig
// stays in bootstrap/infrastructure. DetectionConfig carries the detector
// thresholds: their calibration is audit policy, so they are configuration
// with defaults equal to the reference values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub auditor_tokens: Vec<String>,
    pub alert_webhook_url: Option<String>,
    pub alert_webhook_template: Option<String>,
    pub detect_after_import: bool,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub detection: DetectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Withdrawals strictly above this amount are flagged.
    pub high_value_threshold: f64,
    /// Same-day transaction count strictly above this is flagged.
    pub daily_burst_threshold: usize,
    /// Weekend transactions strictly above this amount are flagged.
    pub weekend_amount_threshold: f64,
    /// Minimum same-day group size considered for fractionation.
    pub fractionation_min_group: usize,
    /// Flag when (max - min) / mean falls below this ratio.
    pub fractionation_spread_ratio: f64,
    /// Fractionation only applies when the group mean exceeds this.
    pub fractionation_min_average: f64,
    /// Share of a holder's spend at one counterparty that triggers a flag.
    pub concentration_ratio: f64,
    /// Minimum transaction count at one counterparty for concentration.
    pub concentration_min_count: usize,
    /// Window of "recent" activity for the dormancy rule.
    pub recent_window_days: i64,
    /// A holder with no transaction older than this is considered dormant.
    pub dormancy_days: i64,
    /// Minimum qualifying digits per holder for the Benford test.
    pub benford_min_sample: usize,
    /// Chi-square critical value (p = 0.05, 8 degrees of freedom).
    pub benford_chi_square_critical: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            high_value_threshold: 2000.0,
            daily_burst_threshold: 5,
            weekend_amount_threshold: 500.0,
            fractionation_min_group: 3,
            fractionation_spread_ratio: 0.2,
            fractionation_min_average: 200.0,
            concentration_ratio: 0.7,
            concentration_min_count: 5,
            recent_window_days: 30,
            dormancy_days: 60,
            benford_min_sample: 30,
            benford_chi_square_critical: 15.51,
        }
    }
}
