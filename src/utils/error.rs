use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Network Error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("timeout of {timeout_ms}ms exceeded")]
    TimeoutError { timeout_ms: u128 },

    #[error("Request failed with status code {status}")]
    StatusError { status: u16, body: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Response from {path} carried no data")]
    MissingDataError { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Data,
    Configuration,
    System,
}

impl PortfolioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::HttpError(_) | PortfolioError::TimeoutError { .. } => {
                ErrorCategory::Network
            }
            PortfolioError::StatusError { .. } => ErrorCategory::Backend,
            PortfolioError::SerializationError(_) | PortfolioError::MissingDataError { .. } => {
                ErrorCategory::Data
            }
            PortfolioError::ConfigError { .. } | PortfolioError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            PortfolioError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the portfolio backend: {}", self),
            ErrorCategory::Backend => format!("The portfolio backend rejected the request: {}", self),
            ErrorCategory::Data => format!("The portfolio backend sent unexpected data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortfolioError::TimeoutError { .. } => {
                "Check that the backend is running, or raise --timeout-secs"
            }
            PortfolioError::HttpError(_) => "Check --backend-url and your network connection",
            PortfolioError::StatusError { status, .. } if *status == 404 => {
                "Check the requested id; the backend has no such entry"
            }
            PortfolioError::StatusError { .. } => "Check the backend logs for the failing request",
            PortfolioError::SerializationError(_) | PortfolioError::MissingDataError { .. } => {
                "Make sure the client and backend versions match"
            }
            PortfolioError::ConfigError { .. } | PortfolioError::InvalidConfigValueError { .. } => {
                "Fix the configuration value named above and try again"
            }
            PortfolioError::IoError(_) => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
