//! API-specific error types
//!
//! Provides error classification for API operations. HTTP failure statuses
//! only become errors in the JSON helpers; the authenticated request function
//! itself hands failing responses back untouched.

use refundline_domain::RefundlineError;
use reqwest::StatusCode;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403, failed refresh)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth) and undecodable bodies
    Client,
    /// Network/connection errors
    Network,
    /// Configuration errors
    Config,
}

/// Why the credential-renewal exchange failed.
///
/// `Clone` because a single in-flight refresh result is shared by every
/// caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("refresh endpoint rejected the session with status {status}")]
    Rejected { status: u16 },

    #[error("refresh endpoint unreachable: {0}")]
    Transport(String),

    #[error("refresh endpoint returned an unusable body: {0}")]
    InvalidResponse(String),
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Non-success response; `message` is the normalized error message.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Credential refresh failed: {0}")]
    Refresh(#[from] RefreshError),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) | Self::Refresh(_) => ApiErrorCategory::Authentication,
            Self::Status { status, .. } => {
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN {
                    ApiErrorCategory::Authentication
                } else if *status == StatusCode::TOO_MANY_REQUESTS {
                    ApiErrorCategory::RateLimit
                } else if status.is_server_error() {
                    ApiErrorCategory::Server
                } else {
                    ApiErrorCategory::Client
                }
            }
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Client,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// The call ended in a 401 that the refresh could not recover.
    ///
    /// Callers use this to decide whether to drop the session and send the
    /// user back to the login screen.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convert from the domain error into ApiError
impl From<RefundlineError> for ApiError {
    fn from(err: RefundlineError) -> Self {
        match err {
            RefundlineError::Network(message) => Self::Network(message),
            RefundlineError::Auth(message) => Self::Auth(message),
            RefundlineError::Config(message) => Self::Config(message),
            RefundlineError::NotFound(message) | RefundlineError::InvalidInput(message) => {
                Self::Config(message)
            }
            RefundlineError::Internal(message) => Self::Decode(message),
        }
    }
}
