//! Domain types and models
//!
//! Wire contracts of the refund-status API. Field names follow the server's
//! camelCase JSON.

pub mod assistant;
pub mod auth;
pub mod refund;

pub use assistant::{
    AssistantAction, AssistantActionType, AssistantChatRequest, AssistantChatResponse,
    AssistantCitation, Confidence,
};
pub use auth::{Credential, Identity, LoginRequest, RegisterRequest, TokenResponse};
pub use refund::{RefundStatus, RefundStatusResponse, RefundStatusUpdate};
