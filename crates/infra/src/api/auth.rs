//! Authentication commands
//!
//! Login and registration go out without a bearer credential and are never
//! retried on 401: a 401 there means wrong credentials, not an expired
//! session. Logout and the identity probe use the authenticated path.

use std::sync::Arc;

use refundline_domain::constants::{IDENTITY_PATH, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH};
use refundline_domain::{Credential, Identity, LoginRequest, RegisterRequest, TokenResponse};
use tracing::{debug, info, instrument, warn};

use super::client::{decode_json, status_error, ApiClient};
use super::errors::ApiError;
use super::request::ApiRequest;

/// Session lifecycle calls against the auth endpoints
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    /// Auth calls sharing `client`'s session and cookie store.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with the server's message (e.g. an
    /// already-registered email) on a non-success response.
    #[instrument(skip_all)]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .send_unauthenticated(ApiRequest::post(REGISTER_PATH).json(request)?)
            .await?;

        if !response.is_success() {
            return Err(status_error(&response));
        }

        info!("account registered");
        Ok(())
    }

    /// Exchange email and password for an access credential.
    ///
    /// On success the credential is stored in the session and returned; the
    /// server also sets the refresh cookie, which the transport keeps.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for rejected credentials and
    /// [`ApiError::Decode`] if the body carries no usable `accessToken`.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let request = LoginRequest { email: email.to_string(), password: password.to_string() };
        let response =
            self.client.send_unauthenticated(ApiRequest::post(LOGIN_PATH).json(&request)?).await?;

        let token: TokenResponse = decode_json(&response)?;
        if token.access_token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty accessToken".into()));
        }

        self.client.session().set(Some(token.access_token.clone()));
        info!("logged in");
        Ok(token.access_token)
    }

    /// Invalidate the server session and forget the local credential.
    ///
    /// The response status is ignored. The local credential is cleared even
    /// when the call cannot be delivered.
    ///
    /// # Errors
    ///
    /// Returns the transport error after clearing the session.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.client.send(ApiRequest::post(LOGOUT_PATH)).await;
        self.client.session().clear();

        match result {
            Ok(response) => {
                debug!(status = %response.status(), "logout acknowledged");
                info!("logged out");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "logout request failed; local session cleared anyway");
                Err(err)
            }
        }
    }

    /// Identity behind the current credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with status 401 when neither the
    /// credential nor a refresh could authenticate the call.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<Identity, ApiError> {
        let identity: Identity = self.client.get_json(IDENTITY_PATH).await?;
        debug!(user_id = identity.user_id, "identity resolved");
        Ok(identity)
    }

    /// Renew the credential from the refresh cookie without a failing call.
    ///
    /// Useful at startup to resume a session the transport still holds a
    /// cookie for. Shares any renewal already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Refresh`] if renewal fails; the session is left as it was.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Credential, ApiError> {
        Ok(self.client.refresher().refresh().await?)
    }
}
