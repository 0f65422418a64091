//! Error message extraction
//!
//! Turns a failed response into one string that can be shown to the user.
//! The body is first classified into an [`ErrorPayload`]; every variant then
//! maps to a message, so extraction cannot fail.

use serde_json::{Map, Value};

use crate::http::ApiResponse;

/// Recognised failure body: an object carrying a string `message` and/or
/// `error`, plus the informational fields the server adds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorEnvelope {
    pub message: Option<String>,
    pub error: Option<String>,
    pub status: Option<u16>,
    pub path: Option<String>,
    pub timestamp: Option<String>,
}

impl ErrorEnvelope {
    /// Decode from a JSON object. `None` unless `message` or `error` is a string.
    fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let string_field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_owned);

        let envelope = Self {
            message: string_field("message"),
            error: string_field("error"),
            status: object
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|status| u16::try_from(status).ok()),
            path: string_field("path"),
            timestamp: string_field("timestamp"),
        };

        (envelope.message.is_some() || envelope.error.is_some()).then_some(envelope)
    }
}

/// Classified failure body
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// JSON object with a string `message` or `error`
    Envelope(ErrorEnvelope),
    /// Any other well-formed JSON
    Json(Value),
    /// Non-empty body not declared as JSON
    Text(String),
    /// Empty body, malformed JSON, or text that is not UTF-8
    Unreadable,
}

impl ErrorPayload {
    pub fn parse(response: &ApiResponse) -> Self {
        let declares_json = response
            .content_type()
            .is_some_and(|content_type| content_type.to_ascii_lowercase().contains("application/json"));

        if declares_json {
            return match serde_json::from_slice::<Value>(response.body()) {
                Ok(Value::Object(object)) => match ErrorEnvelope::from_object(&object) {
                    Some(envelope) => Self::Envelope(envelope),
                    None => Self::Json(Value::Object(object)),
                },
                Ok(other) => Self::Json(other),
                Err(_) => Self::Unreadable,
            };
        }

        match response.text() {
            Ok(text) if !text.is_empty() => Self::Text(text.to_owned()),
            _ => Self::Unreadable,
        }
    }

    /// Message for this payload; `status_line` is used when nothing better exists.
    pub fn into_message(self, status_line: impl FnOnce() -> String) -> String {
        match self {
            Self::Envelope(ErrorEnvelope { message: Some(message), .. }) => message,
            Self::Envelope(ErrorEnvelope { error: Some(error), .. }) => error,
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text,
            Self::Envelope(_) | Self::Unreadable => status_line(),
        }
    }
}

/// Human-readable message for a failed response.
///
/// Prefers the envelope's `message`, then `error`; other JSON is returned
/// re-serialized, plain text verbatim, and anything unreadable or empty as
/// `"<code> <reason>"`. Calling it twice on the same response yields the same
/// string.
pub fn extract_message(response: &ApiResponse) -> String {
    ErrorPayload::parse(response).into_message(|| response.status_line())
}
