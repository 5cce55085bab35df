use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use audit_domain::{DbConfig, DetectionConfig, RuntimeConfig};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub auditor_tokens: Vec<String>,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub alert_webhook_url: Option<String>,
    pub alert_webhook_template: Option<String>,
    pub detect_after_import: bool,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub detection: DetectionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3450".to_string(),
            api_token: None,
            auditor_tokens: Vec::new(),
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "cpgf_audit".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            alert_webhook_url: None,
            alert_webhook_template: None,
            detect_after_import: false,
            max_body_bytes: 16 * 1024 * 1024,
            request_timeout_seconds: 30,
            detection: DetectionConfig::default(),
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("CPGF_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(user) = &self.clickhouse_user {
            if user.trim().is_empty() {
                self.clickhouse_user = None;
            }
        }
        if let Some(password) = &self.clickhouse_password {
            if password.trim().is_empty() {
                self.clickhouse_password = None;
            }
        }
        if let Some(webhook_url) = &self.alert_webhook_url {
            if webhook_url.trim().is_empty() {
                self.alert_webhook_url = None;
            }
        }
        if let Some(template) = &self.alert_webhook_template {
            if template.trim().is_empty() {
                self.alert_webhook_template = None;
            }
        }
        self.auditor_tokens = normalize_token_list(std::mem::take(&mut self.auditor_tokens));
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        let detection = &self.detection;
        if detection.fractionation_min_group < 2 {
            return Err(anyhow!("detection.fractionation_min_group must be at least 2"));
        }
        if detection.fractionation_spread_ratio <= 0.0 {
            return Err(anyhow!("detection.fractionation_spread_ratio must be positive"));
        }
        if detection.concentration_ratio <= 0.0 || detection.concentration_ratio > 1.0 {
            return Err(anyhow!("detection.concentration_ratio must be within (0, 1]"));
        }
        if detection.benford_min_sample == 0 {
            return Err(anyhow!("detection.benford_min_sample must be greater than 0"));
        }
        if detection.recent_window_days <= 0 || detection.dormancy_days <= 0 {
            return Err(anyhow!("detection windows must be positive day counts"));
        }
        if detection.recent_window_days > detection.dormancy_days {
            return Err(anyhow!(
                "detection.recent_window_days must not exceed detection.dormancy_days"
            ));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            auditor_tokens: self.auditor_tokens.clone(),
            alert_webhook_url: self.alert_webhook_url.clone(),
            alert_webhook_template: self.alert_webhook_template.clone(),
            detect_after_import: self.detect_after_import,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            detection: self.detection.clone(),
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("CPGF_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("CPGF_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("CPGF_AUDITOR_TOKENS") {
            self.auditor_tokens = parse_env_token_list(&value);
        }
        if let Ok(value) = env::var("CPGF_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Ok(value) = env::var("CPGF_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Ok(value) = env::var("CPGF_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Ok(value) = env::var("CPGF_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Ok(value) = env::var("CPGF_ALERT_WEBHOOK_URL") {
            self.alert_webhook_url = Some(value);
        }
        if let Ok(value) = env::var("CPGF_ALERT_WEBHOOK_TEMPLATE") {
            self.alert_webhook_template = Some(value);
        }
        if let Ok(value) = env::var("CPGF_DETECT_AFTER_IMPORT") {
            self.detect_after_import = value.parse().unwrap_or(self.detect_after_import);
        }
        if let Ok(value) = env::var("CPGF_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("CPGF_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

fn parse_env_token_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn normalize_token_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blank_optionals_and_dedups_tokens() {
        let mut config = AppConfig {
            api_token: Some("   ".to_string()),
            auditor_tokens: vec![
                " tok-a ".to_string(),
                "tok-a".to_string(),
                String::new(),
                "tok-b".to_string(),
            ],
            ..AppConfig::default()
        };
        config.normalize();
        assert!(config.api_token.is_none());
        assert_eq!(config.auditor_tokens, vec!["tok-a", "tok-b"]);
    }

    #[test]
    fn validate_rejects_bad_bind_addr() {
        let config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_detection_windows() {
        let mut config = AppConfig::default();
        config.detection.recent_window_days = 90;
        config.detection.dormancy_days = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_carry_reference_thresholds() {
        let config = AppConfig::default();
        assert_eq!(config.detection.high_value_threshold, 2000.0);
        assert_eq!(config.detection.benford_chi_square_critical, 15.51);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_env_token_lists() {
        assert_eq!(
            parse_env_token_list(" a , ,b,"),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
