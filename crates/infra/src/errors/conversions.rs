//! Conversions from external infrastructure errors into domain errors.

use refundline_domain::RefundlineError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RefundlineError);

impl From<InfraError> for RefundlineError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RefundlineError> for InfraError {
    fn from(value: RefundlineError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRefundlineError {
    fn into_refundline(self) -> RefundlineError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RefundlineError */
/* -------------------------------------------------------------------------- */

impl IntoRefundlineError for HttpError {
    fn into_refundline(self) -> RefundlineError {
        if self.is_timeout() {
            return RefundlineError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return RefundlineError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return RefundlineError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return RefundlineError::Internal(format!("failed to decode HTTP response: {self}"));
        }

        RefundlineError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_refundline())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → RefundlineError */
/* -------------------------------------------------------------------------- */

impl IntoRefundlineError for url::ParseError {
    fn into_refundline(self) -> RefundlineError {
        RefundlineError::Config(format!("invalid URL: {self}"))
    }
}

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(value.into_refundline())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
