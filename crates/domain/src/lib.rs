//! # Refundline Domain
//!
//! Business domain types and models for the Refundline API client.
//!
//! This crate contains:
//! - Wire types exchanged with the refund-status API (auth, refund, assistant)
//! - The opaque access [`Credential`]
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Endpoint path constants
//!
//! ## Architecture
//! - No dependencies on other Refundline crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
