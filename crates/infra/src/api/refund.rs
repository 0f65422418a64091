//! Refund status commands

use std::sync::Arc;

use refundline_domain::constants::{REFUND_LATEST_PATH, REFUND_SIMULATE_PATH};
use refundline_domain::{RefundStatusResponse, RefundStatusUpdate};
use tracing::{debug, instrument};

use super::client::{status_error, ApiClient};
use super::errors::ApiError;
use super::request::ApiRequest;

/// Refund status calls for the logged-in user
pub struct RefundApi {
    client: Arc<ApiClient>,
}

impl RefundApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Most recent refund status
    ///
    /// # Errors
    ///
    /// Returns error if API request fails
    #[instrument(skip(self))]
    pub async fn latest(&self) -> Result<RefundStatusResponse, ApiError> {
        let response: RefundStatusResponse = self.client.get_json(REFUND_LATEST_PATH).await?;

        debug!(tax_year = response.tax_year, status = ?response.status, "Refund status fetched");
        Ok(response)
    }

    /// Push a status change for the user's refund (demo/test environments).
    ///
    /// The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns error if API request fails
    #[instrument(skip(self, update), fields(tax_year = update.tax_year, status = ?update.status))]
    pub async fn simulate(&self, update: &RefundStatusUpdate) -> Result<(), ApiError> {
        let response =
            self.client.send(ApiRequest::post(REFUND_SIMULATE_PATH).json(update)?).await?;

        if !response.is_success() {
            return Err(status_error(&response));
        }

        debug!("Refund status simulated");
        Ok(())
    }
}
