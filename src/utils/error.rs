use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransitError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    ApiStatus { status: u16, url: String },

    #[error("Malformed {resource} response: {message}")]
    MalformedResponse { resource: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Stop not found: {name}")]
    StopNotFound { name: String },

    #[error("No route found from '{from}' to '{to}'")]
    NoRouteFound { from: String, to: String },

    #[error("Transit network has no routes")]
    EmptyNetwork,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Lookup,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl TransitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::ApiStatus { .. } => ErrorCategory::Network,
            Self::MalformedResponse { .. } | Self::SerializationError(_) | Self::EmptyNetwork => {
                ErrorCategory::Data
            }
            Self::StopNotFound { .. } | Self::NoRouteFound { .. } => ErrorCategory::Lookup,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Lookup => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether a request that failed with this error is worth sending again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::ApiStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check your network connection and the API base URL",
            Self::ApiStatus { status, .. } if *status == 429 => {
                "You are being rate-limited; pass an API key with --api-key or MBTA_API_KEY"
            }
            Self::ApiStatus { .. } => "The transit API rejected the request; try again later",
            Self::MalformedResponse { .. } | Self::SerializationError(_) => {
                "The API response format may have changed; run with --verbose for details"
            }
            Self::StopNotFound { .. } => {
                "Stop names are case-sensitive and must match the API exactly, e.g. 'Kendall/MIT'"
            }
            Self::NoRouteFound { .. } => "Try --strategy breadth-first to search multi-transfer trips",
            Self::EmptyNetwork => "Check the --route-types filter; no routes matched it",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Fix the configuration value and run again",
            Self::IoError(_) => "Check that the file exists and is readable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) => "Could not reach the transit API".to_string(),
            Self::ApiStatus { status, .. } => format!("Transit API responded with HTTP {}", status),
            Self::StopNotFound { name } => format!("No subway stop named '{}'", name),
            Self::NoRouteFound { from, to } => {
                format!("Could not find a subway route from '{}' to '{}'", from, to)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;
