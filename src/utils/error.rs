use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Service {api} has no method named '{method}'")]
    UnknownMethod { api: String, method: String },

    #[error("Missing value for {binding} parameter '{name}' of {method}")]
    MissingArgument {
        method: String,
        name: String,
        binding: String,
    },

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("HTTP {status} returned by {url}")]
    Status {
        status: u16,
        url: String,
        body: Option<String>,
    },

    #[error("HTTP request/response body of type {kind} is currently not supported")]
    UnsupportedBody { kind: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Invocation,
    Data,
    Server,
}

impl ClientError {
    pub fn config(message: impl Into<String>) -> Self {
        ClientError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::ApiError(_) | ClientError::IoError(_) => ErrorCategory::Network,
            ClientError::UrlError(_)
            | ClientError::TomlError(_)
            | ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ClientError::UnknownMethod { .. }
            | ClientError::MissingArgument { .. }
            | ClientError::InvalidArgument { .. } => ErrorCategory::Invocation,
            ClientError::SerializationError(_) | ClientError::UnsupportedBody { .. } => {
                ErrorCategory::Data
            }
            ClientError::Status { .. } => ErrorCategory::Server,
        }
    }

    /// Short message for terminal output, without the response body.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the service: {}", self),
            ErrorCategory::Configuration => format!("Service definition is invalid: {}", self),
            ErrorCategory::Invocation => format!("Call rejected before sending: {}", self),
            ErrorCategory::Data => format!("Could not convert message body: {}", self),
            ErrorCategory::Server => format!("Service answered with an error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
