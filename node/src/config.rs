//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use factcheck_store::DEFAULT_MAX_REPORTS;
use factcheck_store_json::REPORTS_FILE_NAME;
use factcheck_utils::LogFormat;
use factcheck_verification::google::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_MODEL};
use factcheck_verification::{usable_api_key, GoogleProviderConfig};

use crate::NodeError;

/// Provider credential. Never printed and never written back to TOML.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Configuration for the factcheck service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address to bind the HTTP server on.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// HTTP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `reports.json`. Created on first run.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory served for non-API `GET` requests.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Maximum number of reports retained; older ones are evicted.
    #[serde(default = "default_max_reports")]
    pub max_reports: usize,

    /// Credential for the external verdict provider. Absent means heuristic only.
    #[serde(default, skip_serializing)]
    pub google_api_key: Option<ApiKey>,

    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    #[serde(default = "default_provider_api_version")]
    pub provider_api_version: String,

    #[serde(default = "default_provider_model")]
    pub provider_model: String,

    /// Provider request timeout. Unset leaves the HTTP client without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_timeout_secs: Option<u64>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to expose `GET /metrics`.
    #[serde(default)]
    pub enable_metrics: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./public")
}

fn default_max_reports() -> usize {
    DEFAULT_MAX_REPORTS
}

fn default_provider_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_provider_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_provider_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string. The API key is omitted.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn reports_path(&self) -> PathBuf {
        self.data_dir.join(REPORTS_FILE_NAME)
    }

    /// Provider settings, or `None` when no usable key is configured.
    pub fn provider_config(&self) -> Option<GoogleProviderConfig> {
        let key = self.google_api_key.as_ref()?.expose();
        if !usable_api_key(key) {
            return None;
        }
        let mut provider = GoogleProviderConfig::new(key.trim());
        provider.base_url = self.provider_base_url.clone();
        provider.api_version = self.provider_api_version.clone();
        provider.model = self.provider_model.clone();
        provider.timeout = self.provider_timeout_secs.map(Duration::from_secs);
        Some(provider)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.max_reports == 0 {
            return Err(NodeError::Config("max_reports must be at least 1".into()));
        }
        if self.provider_model.trim().is_empty() {
            return Err(NodeError::Config("provider_model must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            static_dir: default_static_dir(),
            max_reports: default_max_reports(),
            google_api_key: None,
            provider_base_url: default_provider_base_url(),
            provider_api_version: default_provider_api_version(),
            provider_model: default_provider_model(),
            provider_timeout_secs: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            enable_metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ServiceConfig::default();
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = ServiceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.max_reports, config.max_reports);
        assert_eq!(parsed.data_dir, config.data_dir);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_reports, 1000);
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.provider_model, "text-bison-001");
        assert!(config.google_api_key.is_none());
        assert_eq!(config.reports_path(), PathBuf::from("./data/reports.json"));
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            port = 9999
            max_reports = 50
            log_format = "json"
            provider_timeout_secs = 20
        "#;
        let config = ServiceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.port, 9999);
        assert_eq!(config.max_reports, 50);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.provider_timeout_secs, Some(20));
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn api_key_is_never_serialized_or_printed() {
        let config = ServiceConfig {
            google_api_key: Some(ApiKey::new("AIzaSecretValue")),
            ..Default::default()
        };
        assert!(!config.to_toml_string().unwrap().contains("AIzaSecretValue"));
        assert!(!format!("{config:?}").contains("AIzaSecretValue"));
    }

    #[test]
    fn placeholder_key_disables_provider() {
        let mut config = ServiceConfig::default();
        assert!(config.provider_config().is_none());

        config.google_api_key = Some(ApiKey::new("your-key-here..."));
        assert!(config.provider_config().is_none());

        config.google_api_key = Some(ApiKey::new("  AIzaReal  "));
        config.provider_timeout_secs = Some(3);
        let provider = config.provider_config().expect("usable key");
        assert_eq!(provider.api_key, "AIzaReal");
        assert_eq!(provider.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = ServiceConfig {
            max_reports: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NodeError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ServiceConfig::from_toml_file(Path::new("/nonexistent/factcheck.toml"));
        assert!(matches!(result, Err(NodeError::Config(_))));
    }
}
