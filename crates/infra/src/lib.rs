//! # Refundline Infrastructure
//!
//! I/O side of the Refundline client.
//!
//! This crate contains:
//! - The cookie-carrying HTTP transport
//! - The authenticated API client: session state, single-flight credential
//!   refresh, error message normalization and typed endpoint wrappers
//! - Configuration loading (environment variables, JSON/TOML files)
//! - Tracing initialization
//!
//! ## Architecture
//! - Depends on `refundline-domain` for wire types, config and errors
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{
    extract_message, ApiClient, ApiClientConfig, ApiError, ApiRequest, AssistantApi, AuthApi,
    RefreshCoordinator, RefundApi, Session,
};
pub use errors::InfraError;
pub use http::{ApiResponse, HttpClient};
pub use observability::init_tracing;
