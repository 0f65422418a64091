//! Authenticated client for the refund-status API
//!
//! # Architecture
//!
//! - [`Session`] holds the one access credential, shared via `Arc`
//! - [`ApiClient::send`] attaches it and recovers once from a 401
//! - [`RefreshCoordinator`] renews the credential, single-flighted
//! - [`extract_message`] turns a failed response into a display message
//! - [`AuthApi`], [`RefundApi`], [`AssistantApi`] wrap the individual endpoints

pub mod assistant;
pub mod auth;
pub mod client;
pub mod error_message;
pub mod errors;
pub mod refresh;
pub mod refund;
pub mod request;
pub mod session;

pub use assistant::AssistantApi;
pub use auth::AuthApi;
pub use client::{decode_json, status_error, ApiClient, ApiClientBuilder, ApiClientConfig};
pub use error_message::{extract_message, ErrorEnvelope, ErrorPayload};
pub use errors::{ApiError, ApiErrorCategory, RefreshError};
pub use refresh::RefreshCoordinator;
pub use refund::RefundApi;
pub use request::ApiRequest;
pub use session::Session;
