//! # Common Error Types
//!
//! Consolidated error handling for the ReWear client.
//!
//! ## Error Categories
//!
//! - [`ApiError`]: everything that can go wrong talking to the backend. The
//!   backend reports failures on two channels: a non-2xx status, and a 2xx body
//!   with `success: false`. [`crate::services::api::ApiClient`] folds both into
//!   this one type, so callers handle a single `Err` path.
//! - [`AppError`]: what view controllers return. Wraps [`ApiError`] and adds
//!   local failures (validation, access, state, configuration).
//!
//! ## Usage Pattern
//!
//! ```rust
//! use rewear_client::core::error::ApiError;
//!
//! let err = ApiError::Rejected { status: 200, message: Some("Insufficient points.".to_string()) };
//! assert_eq!(err.user_message("Failed to redeem item"), "Insufficient points.");
//!
//! let err = ApiError::Network { message: "connection refused".to_string() };
//! assert_eq!(err.status(), 0);
//! ```

use thiserror::Error;

/// Shown when the backend could not be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Failure of a single backend call.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout. Carries no HTTP status (reported as 0).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-2xx response. `body` is the parsed JSON body, or `Null` if it was not JSON.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http {
        status: u16,
        message: Option<String>,
        body: serde_json::Value,
    },

    /// 2xx response whose envelope says `success: false`.
    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, message: Option<String> },

    /// Body could not be decoded into the expected payload.
    #[error("Failed to parse response: {message}")]
    Decode { status: u16, message: String },

    /// The request could not be built from local input, so nothing was sent.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ApiError {
    /// HTTP status of the failed call, 0 for network-level failures.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Network { .. } | ApiError::InvalidRequest { .. } => 0,
            ApiError::Http { status, .. }
            | ApiError::Rejected { status, .. }
            | ApiError::Decode { status, .. } => *status,
        }
    }

    /// Human readable text supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } | ApiError::Rejected { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Text to surface to the user: the server's message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network { .. } => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::InvalidRequest { message } => message.clone(),
            _ => self.server_message().unwrap_or(fallback).to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

/// Application-wide error type returned by view controllers.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local input checks failed before anything was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The current session may not perform the action.
    #[error("Access denied: {0}")]
    Access(String),

    /// The view is not in a state that allows the action (still loading, busy, ...).
    #[error("State error: {0}")]
    State(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Text to surface to the user, falling back to `fallback` for API errors without a message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Api(err) => err.user_message(fallback),
            AppError::Validation(msg)
            | AppError::Access(msg)
            | AppError::State(msg)
            | AppError::Config(msg) => msg.clone(),
        }
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_zero_for_network_failures() {
        let err = ApiError::Network { message: "timed out".to_string() };
        assert_eq!(err.status(), 0);
        assert!(err.is_network());
        assert_eq!(err.user_message("ignored"), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Http {
            status: 400,
            message: Some("Item is not pending approval.".to_string()),
            body: serde_json::json!({ "success": false }),
        };
        assert_eq!(err.user_message("Failed to approve item"), "Item is not pending approval.");
        assert_eq!(err.to_string(), "HTTP 400: Item is not pending approval.");
    }

    #[test]
    fn test_user_message_falls_back_when_server_is_silent() {
        let err = ApiError::Rejected { status: 200, message: None };
        assert_eq!(err.user_message("Failed to reject item"), "Failed to reject item");

        let err = ApiError::Decode { status: 200, message: "missing field `user`".to_string() };
        assert_eq!(err.user_message("Failed to load profile"), "Failed to load profile");
    }

    #[test]
    fn test_not_found_detection() {
        let err = ApiError::Http { status: 404, message: None, body: serde_json::Value::Null };
        assert!(err.is_not_found());
        assert!(!err.is_network());
    }

    #[test]
    fn test_app_error_wraps_api_error() {
        let app: AppError = ApiError::Rejected {
            status: 200,
            message: Some("nope".to_string()),
        }
        .into();
        assert_eq!(app.user_message("fallback"), "nope");
        let validation = AppError::Validation("Bill required".to_string());
        assert_eq!(validation.user_message("x"), "Bill required");
    }
}
