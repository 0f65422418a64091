//! Request descriptor

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

use super::errors::ApiError;

/// What to call: method, path relative to the API base URL, header overrides
/// and an optional body.
///
/// A present body makes the client send `Content-Type: application/json`;
/// caller headers are kept as given apart from `Authorization` and
/// `Content-Type`, which the client controls when it injects them.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ApiRequest {
    /// Request for `path`, resolved against the client's base URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), headers: HeaderMap::new(), body: None }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Add a header, replacing any previous value for `name`.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Raw body, sent as-is.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the value cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::Config(format!("Failed to serialize body: {}", e)))?;
        Ok(self.body(bytes))
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Caller-supplied headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body, if one was set.
    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}
