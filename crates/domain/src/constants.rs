//! Application constants
//!
//! Endpoint paths of the refund-status API. Paths are relative to the
//! configured base URL and must match the server bit for bit.

// Authentication
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REFRESH_PATH: &str = "/api/auth/refresh";
pub const LOGOUT_PATH: &str = "/api/auth/logout";
/// Canonical identity probe. The server also exposes `/api/profile/me`,
/// which this client does not use.
pub const IDENTITY_PATH: &str = "/api/auth/me";

// Refund status
pub const REFUND_LATEST_PATH: &str = "/api/refund/latest";
pub const REFUND_SIMULATE_PATH: &str = "/api/refund/simulate";

// Assistant
pub const ASSISTANT_CHAT_PATH: &str = "/api/assistant/chat";

// Client defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";
