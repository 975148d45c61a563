//! Connection settings for [`crate::ApiClient`].

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Ignored in the browser, where fetch has no per-request timeout.
    pub timeout: Duration,
    pub default_headers: Vec<(String, String)>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add or replace a default header. Names compare case-insensitively.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers = merge_headers(&self.default_headers, &[(name.into(), value.into())]);
        self
    }
}

/// Defaults overlaid with per-request overrides. An override replaces a
/// default of the same name and keeps the default's position.
pub fn merge_headers(
    defaults: &[(String, String)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults.to_vec();
    for (name, value) in overrides {
        match merged
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value.clone(),
            None => merged.push((name.clone(), value.clone())),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.default_headers.len(), 1);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = ApiConfig::default()
            .with_base_url("https://aqi.example.org/api/")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://aqi.example.org/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let defaults = ApiConfig::default()
            .with_header("X-Client", "dashboard")
            .default_headers;
        let merged = merge_headers(
            &defaults,
            &[
                ("content-type".to_string(), "text/plain".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        );
        assert_eq!(
            merged,
            vec![
                ("Content-Type".to_string(), "text/plain".to_string()),
                ("X-Client".to_string(), "dashboard".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ]
        );
    }
}
