use crate::adapters::http::{
    DEFAULT_BASE_URL, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECONDS,
};
use crate::config::trip_pairs;
use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, RouteStrategy, TripQuery, SUBWAY_ROUTE_TYPES};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Flags left unset fall back to the `--config` file, then to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mbta-subway")]
#[command(about = "List MBTA subway routes, their transfer stops, and routes between two stops")]
pub struct CliConfig {
    /// API root [default: https://api-v3.mbta.com]
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Optional; requests without a key are rate-limited harder
    #[arg(long, env = "MBTA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Route types to treat as subway (0 = Light Rail, 1 = Heavy Rail) [default: 0,1]
    #[arg(long, value_delimiter = ',')]
    pub route_types: Option<Vec<u8>>,

    /// Page size; when set, pagination links are followed
    #[arg(long)]
    pub page_limit: Option<usize>,

    /// [default: 30]
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// [default: 2]
    #[arg(long)]
    pub retry_attempts: Option<u32>,

    /// [default: 500]
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// A trip to plan, as two stop names; may be repeated
    #[arg(long = "trip", num_args = 2, value_names = ["FROM", "TO"])]
    pub trip: Vec<String>,

    #[arg(long, value_enum)]
    pub strategy: Option<RouteStrategy>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// TOML configuration file; flags given on the command line override it and --trip values are appended
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log time and memory after each phase")]
    pub monitor: bool,
}

impl CliConfig {
    pub fn cli_trips(&self) -> Vec<TripQuery> {
        trip_pairs(&self.trip)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", self.api_base_url())?;
        validation::validate_non_empty_list("route_types", self.route_types())?;
        if let Some(limit) = self.page_limit {
            validation::validate_positive_number("page_limit", limit, 1)?;
        }
        validation::validate_range("timeout_seconds", self.request_timeout().as_secs(), 1, 300)?;
        for trip in self.cli_trips() {
            validation::validate_non_empty_string("trip.from", &trip.from)?;
            validation::validate_non_empty_string("trip.to", &trip.to)?;
        }
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    fn route_types(&self) -> &[u8] {
        self.route_types.as_deref().unwrap_or(SUBWAY_ROUTE_TYPES)
    }

    fn page_limit(&self) -> Option<usize> {
        self.page_limit
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS)
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS))
    }

    fn trips(&self) -> Vec<TripQuery> {
        let trips = self.cli_trips();
        if trips.is_empty() {
            TripQuery::defaults()
        } else {
            trips
        }
    }

    fn strategy(&self) -> RouteStrategy {
        self.strategy.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["mbta-subway"]);

        assert_eq!(config.api_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.route_types(), &[0, 1]);
        assert_eq!(config.strategy(), RouteStrategy::Transfer);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.trips(), TripQuery::defaults());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_attempts(), 2);
        assert_eq!(config.retry_delay(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_repeated_trips_pair_up() {
        let config = CliConfig::parse_from([
            "mbta-subway",
            "--trip",
            "Davis",
            "Kendall/MIT",
            "--trip",
            "Airport",
            "Harvard",
            "--strategy",
            "breadth-first",
        ]);

        assert_eq!(
            config.trips(),
            vec![
                TripQuery::new("Davis", "Kendall/MIT"),
                TripQuery::new("Airport", "Harvard")
            ]
        );
        assert_eq!(config.strategy(), RouteStrategy::BreadthFirst);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = CliConfig::parse_from(["mbta-subway", "--api-base-url", "not a url"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["mbta-subway", "--page-limit", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["mbta-subway", "--timeout-seconds", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["mbta-subway", "--route-types", "1"]);
        assert_eq!(config.route_types(), &[1]);
    }
}
