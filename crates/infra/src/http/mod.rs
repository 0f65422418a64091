//! HTTP transport
//!
//! A cookie-carrying reqwest client that sends each request exactly once and
//! hands back a fully buffered [`ApiResponse`].

pub mod client;
pub mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use response::ApiResponse;
