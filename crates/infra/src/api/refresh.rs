//! Credential refresh with single-flight coordination
//!
//! Trades the long-lived session cookie (sent automatically by the transport's
//! cookie store) for a new access credential. Concurrent callers share one
//! in-flight exchange: the first caller starts it, everyone arriving before it
//! resolves awaits the same result.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use refundline_domain::{Credential, TokenResponse};
use reqwest::Method;
use tracing::{debug, info, instrument, warn};

use super::errors::RefreshError;
use super::session::Session;
use crate::http::HttpClient;

type RefreshFuture = Shared<BoxFuture<'static, Result<Credential, RefreshError>>>;

/// Performs the renewal exchange and writes the result into the [`Session`].
pub struct RefreshCoordinator {
    http: HttpClient,
    refresh_url: String,
    session: Arc<Session>,
    in_flight: Mutex<Option<RefreshFuture>>,
}

impl RefreshCoordinator {
    /// # Arguments
    ///
    /// * `http` - Transport (must be the same cookie-carrying client used for login)
    /// * `refresh_url` - Absolute URL of the renewal endpoint
    /// * `session` - Session the renewed credential is written to
    pub fn new(http: HttpClient, refresh_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self { http, refresh_url: refresh_url.into(), session, in_flight: Mutex::new(None) }
    }

    /// Obtain a new credential, joining an exchange already in flight if any.
    ///
    /// The session is updated before this resolves, so a caller that retries
    /// right after sees the new credential.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] if the endpoint rejects the session, cannot be
    /// reached, or answers with an unusable body. Never retried here.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Credential, RefreshError> {
        let exchange = {
            let mut slot = self.in_flight.lock();
            match slot.as_ref() {
                Some(pending) => {
                    debug!("joining in-flight credential refresh");
                    pending.clone()
                }
                None => {
                    let pending = Self::exchange(
                        self.http.clone(),
                        self.refresh_url.clone(),
                        Arc::clone(&self.session),
                    )
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };

        let result = exchange.clone().await;

        let mut slot = self.in_flight.lock();
        if slot.as_ref().is_some_and(|pending| pending.ptr_eq(&exchange)) {
            *slot = None;
        }

        result
    }

    async fn exchange(
        http: HttpClient,
        refresh_url: String,
        session: Arc<Session>,
    ) -> Result<Credential, RefreshError> {
        debug!(url = %refresh_url, "requesting credential refresh");

        let response = http
            .send(http.request(Method::POST, refresh_url.as_str()))
            .await
            .map_err(|err| {
                warn!(error = %err, "credential refresh request failed");
                RefreshError::Transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "credential refresh rejected");
            return Err(RefreshError::Rejected { status: status.as_u16() });
        }

        let token: TokenResponse =
            response.json().map_err(|err| RefreshError::InvalidResponse(err.to_string()))?;
        if token.access_token.is_empty() {
            return Err(RefreshError::InvalidResponse("empty accessToken".to_string()));
        }

        session.set(Some(token.access_token.clone()));
        info!("access credential refreshed");

        Ok(token.access_token)
    }
}
