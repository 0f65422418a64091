//! Authenticated API client
//!
//! Every call to the refund-status API goes through [`ApiClient::send`]: it
//! attaches the session credential, and on a 401 refreshes the credential once
//! and retries once. Any other outcome is handed back untouched.

use std::sync::Arc;
use std::time::Duration;

use refundline_domain::constants::REFRESH_PATH;
use refundline_domain::{ApiSettings, Credential};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::error_message::extract_message;
use super::errors::ApiError;
use super::refresh::RefreshCoordinator;
use super::request::ApiRequest;
use super::session::Session;
use crate::config::parse_base_url;
use crate::http::{ApiResponse, HttpClient};

/// Configuration for API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://refunds.example.com")
    pub base_url: String,
    /// Transport timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// `User-Agent` override; the transport default otherwise
    pub user_agent: Option<String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiSettings::default())
    }
}

impl From<&ApiSettings> for ApiClientConfig {
    fn from(settings: &ApiSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            timeout: settings.timeout_seconds.map(Duration::from_secs),
            user_agent: settings.user_agent.clone(),
        }
    }
}

/// API client bound to one [`Session`]
pub struct ApiClient {
    http: HttpClient,
    config: ApiClientConfig,
    session: Arc<Session>,
    refresher: RefreshCoordinator,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    ///
    /// * `config` - Client configuration
    /// * `session` - Session holding the access credential
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be built
    pub fn new(config: ApiClientConfig, session: Arc<Session>) -> Result<Self, ApiError> {
        parse_base_url(&config.base_url)?;

        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        let refresher = RefreshCoordinator::new(
            http.clone(),
            join_url(&config.base_url, REFRESH_PATH),
            Arc::clone(&session),
        );

        info!(base_url = %config.base_url, "API client initialized");

        Ok(Self { http, config, session, refresher })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Session whose credential this client attaches.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Coordinator for this client's credential refreshes.
    pub fn refresher(&self) -> &RefreshCoordinator {
        &self.refresher
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Send a request with the session credential, recovering once from 401.
    ///
    /// 1. Dispatch with the credential currently held (if any).
    /// 2. Anything but 401 is returned as-is.
    /// 3. On 401, if the session already holds a different credential than
    ///    the one sent (another caller renewed it meanwhile), retry once with
    ///    that credential without refreshing.
    /// 4. Otherwise refresh the credential. If that fails, the original 401
    ///    response is returned unchanged.
    /// 5. After a successful refresh, dispatch once more and return whatever
    ///    comes back, including a second 401.
    ///
    /// # Errors
    ///
    /// Only transport failures and unbuildable requests are errors; HTTP
    /// failure statuses come back as `Ok` responses.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let sent = self.session.get();
        let response = self.dispatch(&request, sent.clone()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        if let Some(current) = self.session.get().filter(|current| Some(current) != sent.as_ref()) {
            debug!("credential renewed while request was in flight, retrying without refresh");
            return self.dispatch(&request, Some(current)).await;
        }

        debug!("request unauthorized, refreshing credential");
        match self.refresher.refresh().await {
            Ok(_) => {
                debug!("retrying request with refreshed credential");
                self.dispatch(&request, self.session.get()).await
            }
            Err(err) => {
                warn!(error = %err, "credential refresh failed, returning original response");
                Ok(response)
            }
        }
    }

    /// Send without a bearer credential and without refresh-on-401.
    ///
    /// Used for login and registration, where a 401 means bad credentials
    /// rather than an expired session. Cookies are still sent.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn send_unauthenticated(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.dispatch(&request, None).await
    }

    /// GET `path` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with the normalized message for non-2xx
    /// responses, [`ApiError::Decode`] if the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(ApiRequest::get(path)).await?;
        decode_json(&response)
    }

    /// POST a JSON body to `path` and decode the JSON answer.
    ///
    /// Use `R = ()` for endpoints that answer with an empty body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_json`], plus [`ApiError::Config`] if the
    /// body cannot be serialized.
    pub async fn post_json<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let response = self.send(ApiRequest::post(path).json(body)?).await?;
        decode_json(&response)
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        credential: Option<Credential>,
    ) -> Result<ApiResponse, ApiError> {
        let mut headers = request.headers().clone();

        if let Some(credential) = credential.filter(|credential| !credential.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
                .map_err(|_| {
                    ApiError::Auth("credential contains characters not allowed in a header".into())
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = self.http.request(request.method().clone(), self.url(request.path()));
        if let Some(body) = request.body_bytes() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            builder = builder.body(body.clone());
        }

        let response = self.http.send(builder.headers(headers)).await?;
        debug!(status = %response.status(), "response received");
        Ok(response)
    }
}

/// [`ApiError::Status`] for a failed response, carrying the normalized message.
pub fn status_error(response: &ApiResponse) -> ApiError {
    ApiError::Status { status: response.status(), message: extract_message(response) }
}

/// Decode a successful JSON response, or turn a failed one into [`ApiError::Status`].
///
/// Empty bodies (including 204/205) decode from `null`, so `()` and
/// `Option<_>` targets work for endpoints without content.
pub fn decode_json<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(response));
    }

    if status == StatusCode::NO_CONTENT
        || status == StatusCode::RESET_CONTENT
        || response.body().is_empty()
    {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "No content response ({}), but response type cannot be deserialized from empty body",
                status.as_u16()
            ))
        });
    }

    response.json().map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    session: Option<Arc<Session>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing session. A fresh, empty one is created otherwise.
    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let session = self.session.unwrap_or_default();

        ApiClient::new(config, session)
    }
}
