use crate::core::retry::DEFAULT_RETRY_STATUSES;
use crate::domain::model::ErrorModel;
use chrono::{DateTime, Utc};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Root of the client's error hierarchy. Every specific kind converts into it.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error(transparent)]
    Deserialization(#[from] DeserializationError),

    #[error(transparent)]
    TokenExpired(#[from] TokenExpiredError),

    #[error(transparent)]
    ClientRequest(#[from] ClientRequestError),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    HttpOperation(#[from] HttpOperationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfig { field: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::ClientRequest(err.into())
    }
}

/// Failure while encoding a request payload.
#[derive(Error, Debug)]
#[error("Unable to serialize request payload: {message}")]
pub struct SerializationError {
    pub message: String,
    #[source]
    pub source: Option<BoxError>,
}

impl SerializationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

/// Failure while decoding a response payload.
#[derive(Error, Debug)]
#[error("Unable to deserialize response data: {message}")]
pub struct DeserializationError {
    pub message: String,
    #[source]
    pub source: Option<BoxError>,
}

impl DeserializationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

#[derive(Error, Debug)]
#[error("Token expired at {expired_at}")]
pub struct TokenExpiredError {
    pub expired_at: DateTime<Utc>,
}

/// The request could not be built or could not reach the service.
#[derive(Error, Debug)]
#[error("Request failed: {message}")]
pub struct ClientRequestError {
    pub message: String,
    #[source]
    pub source: Option<reqwest::Error>,
}

impl ClientRequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Connect failures and timeouts; anything else won't get better on retry.
    pub fn is_transient(&self) -> bool {
        self.source
            .as_ref()
            .is_some_and(|e| e.is_connect() || e.is_timeout())
    }
}

impl From<reqwest::Error> for ClientRequestError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[derive(Error, Debug)]
#[error("Authentication failed: {message}")]
pub struct AuthenticationError {
    pub message: String,
}

impl AuthenticationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The service answered with a status the operation does not accept.
#[derive(Error, Debug)]
#[error("({status}) {message}")]
pub struct HttpOperationError {
    pub status: u16,
    pub reason: String,
    pub message: String,
    pub body: String,
    pub error: Option<ErrorModel>,
}

impl HttpOperationError {
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        let reason = reason.into();
        let body = body.into();
        let error = crate::utils::serialization::deserialize_error(&body);
        let message = error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| format!("Operation returned an invalid status code '{}'", reason));

        Self {
            status,
            reason,
            message,
            body,
            error,
        }
    }
}

impl ClientError {
    /// HTTP status of the failing response, when the service produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpOperation(e) => Some(e.status),
            _ => None,
        }
    }

    /// Whether the default retry policy would retry this failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ClientRequest(e) => e.is_transient(),
            ClientError::HttpOperation(e) => DEFAULT_RETRY_STATUSES.contains(&e.status),
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClientError::Serialization(_) => "Check the value being sent; dates must fall between 0001-01-01 and 9999-12-31",
            ClientError::Deserialization(_) => "The service returned a payload that is not a valid date",
            ClientError::TokenExpired(_) => "Obtain a fresh access token and retry",
            ClientError::ClientRequest(_) => "Check that the service is reachable at the configured base URL",
            ClientError::Authentication(_) => "Check the configured credentials",
            ClientError::HttpOperation(_) => "Inspect the service error message and status code",
            ClientError::Io(_) => "Check that the configuration file exists and is readable",
            ClientError::InvalidConfigValue { .. } | ClientError::MissingConfig { .. } => {
                "Fix the configuration value and try again"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::InvalidConfigValue { .. }
            | ClientError::MissingConfig { .. }
            | ClientError::Io(_) => 1,
            ClientError::ClientRequest(_) | ClientError::HttpOperation(_) => 2,
            ClientError::Serialization(_) | ClientError::Deserialization(_) => 3,
            ClientError::Authentication(_) | ClientError::TokenExpired(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
