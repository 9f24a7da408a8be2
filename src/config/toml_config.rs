use crate::adapters::http::{
    DEFAULT_BASE_URL, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::domain::model::{RouteStrategy, TripQuery, SUBWAY_ROUTE_TYPES};
use crate::utils::error::{Result, TransitError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub finder: FinderConfig,
    #[serde(default)]
    pub trips: Vec<TripQuery>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_route_types")]
    pub route_types: Vec<u8>,
    pub page_limit: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            route_types: default_route_types(),
            page_limit: None,
            timeout_seconds: None,
            retry_attempts: None,
            retry_delay_ms: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_route_types() -> Vec<u8> {
    SUBWAY_ROUTE_TYPES.to_vec()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinderConfig {
    #[serde(default)]
    pub strategy: RouteStrategy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TransitError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TransitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TransitError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Every flag given on the command line replaces the file's value; CLI trips
    /// are appended after the file's trips.
    #[cfg(feature = "cli")]
    pub fn apply_cli_overrides(&mut self, cli: &crate::config::CliConfig) {
        self.trips.extend(cli.cli_trips());
        if let Some(strategy) = cli.strategy {
            self.finder.strategy = strategy;
        }
        if let Some(base_url) = &cli.api_base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(key) = &cli.api_key {
            self.api.api_key = Some(key.clone());
        }
        if let Some(route_types) = &cli.route_types {
            self.api.route_types = route_types.clone();
        }
        if let Some(limit) = cli.page_limit {
            self.api.page_limit = Some(limit);
        }
        if let Some(timeout) = cli.timeout_seconds {
            self.api.timeout_seconds = Some(timeout);
        }
        if let Some(attempts) = cli.retry_attempts {
            self.api.retry_attempts = Some(attempts);
        }
        if let Some(delay) = cli.retry_delay_ms {
            self.api.retry_delay_ms = Some(delay);
        }
        if cli.monitor {
            self.monitoring = Some(MonitoringConfig { enabled: true });
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_non_empty_list("api.route_types", &self.api.route_types)?;
        if let Some(limit) = self.api.page_limit {
            validation::validate_positive_number("api.page_limit", limit, 1)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }
        for trip in &self.trips {
            validation::validate_non_empty_string("trips.from", &trip.from)?;
            validation::validate_non_empty_string("trips.to", &trip.to)?;
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    /// An unresolved `${VAR}` placeholder counts as no key.
    fn api_key(&self) -> Option<&str> {
        self.api
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty() && !key.starts_with("${"))
    }

    fn route_types(&self) -> &[u8] {
        &self.api.route_types
    }

    fn page_limit(&self) -> Option<usize> {
        self.api.page_limit
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn retry_attempts(&self) -> u32 {
        self.api.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS)
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.api.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS))
    }

    fn trips(&self) -> Vec<TripQuery> {
        if self.trips.is_empty() {
            TripQuery::defaults()
        } else {
            self.trips.clone()
        }
    }

    fn strategy(&self) -> RouteStrategy {
        self.finder.strategy
    }
}
