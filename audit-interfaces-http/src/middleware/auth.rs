use axum::http::HeaderMap;

use audit_domain::RuntimeConfig;

/// Identity check. Auditor tokens are credentials in their own right, so a
/// bearer from the auditor list passes here too; the role gate below is a
/// separate fact about the same caller.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if config.api_token.is_none() {
        return true;
    }
    extract_bearer(headers)
        .map(|v| {
            config.api_token.as_deref() == Some(v.as_str())
                || config.auditor_tokens.iter().any(|token| *token == v)
        })
        .unwrap_or(false)
}

/// Statement import is restricted to auditors. With no auditor tokens
/// configured the gate falls back to the plain API token.
pub fn authorize_auditor(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if config.auditor_tokens.is_empty() {
        return authorize(config, headers);
    }
    extract_bearer(headers)
        .map(|v| config.auditor_tokens.iter().any(|token| *token == v))
        .unwrap_or(false)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn config_with(api: Option<&str>, auditors: &[&str]) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: api.map(ToString::to_string),
            auditor_tokens: auditors.iter().map(ToString::to_string).collect(),
            alert_webhook_url: None,
            alert_webhook_template: None,
            detect_after_import: false,
            max_body_bytes: 1024,
            request_timeout_seconds: 5,
            detection: Default::default(),
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn open_when_no_token_configured() {
        let config = config_with(None, &[]);
        assert!(authorize(&config, &HeaderMap::new()));
    }

    #[test]
    fn rejects_wrong_bearer() {
        let config = config_with(Some("secret"), &[]);
        assert!(!authorize(&config, &bearer("other")));
        assert!(authorize(&config, &bearer("secret")));
    }

    #[test]
    fn auditor_gate_requires_listed_token() {
        let config = config_with(Some("secret"), &["aud-1"]);
        assert!(!authorize_auditor(&config, &bearer("secret")));
        assert!(authorize_auditor(&config, &bearer("aud-1")));
    }

    #[test]
    fn auditor_gate_falls_back_to_api_token() {
        let config = config_with(Some("secret"), &[]);
        assert!(authorize_auditor(&config, &bearer("secret")));
        assert!(!authorize_auditor(&config, &bearer("other")));
    }

    #[test]
    fn auditor_token_is_also_an_identity() {
        // api_token and auditor_tokens configured with distinct values: the
        // auditor bearer must clear BOTH gates the import route applies, or
        // nobody could import at all.
        let config = config_with(Some("api-secret"), &["aud-1"]);
        assert!(authorize(&config, &bearer("aud-1")));
        assert!(authorize(&config, &bearer("aud-1")) && authorize_auditor(&config, &bearer("aud-1")));
        // The plain API token keeps its identity but not the role.
        assert!(authorize(&config, &bearer("api-secret")));
        assert!(!authorize_auditor(&config, &bearer("api-secret")));
        // Unknown bearers clear neither.
        assert!(!authorize(&config, &bearer("other")));
    }
}
