//! # Response Envelope
//!
//! Every endpoint answers `{ "success": bool, "message"?: string, ...payload }`.
//! Failures carry `success: false` with a human readable `message` (some
//! handlers use `error` instead).

use serde::{Deserialize, Serialize};

/// The envelope fields common to every response; payload fields are read separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope {
    /// The server's human readable text, preferring `message` over `error`.
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// A decoded payload together with the server message that accompanied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub message: Option<String>,
    pub data: T,
}

impl<T> Reply<T> {
    pub fn new(message: Option<String>, data: T) -> Self {
        Self { message, data }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            message: self.message,
            data: f(self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_prefers_message_then_error() {
        let env: Envelope = serde_json::from_value(serde_json::json!({
            "success": false, "error": "Authentication required."
        }))
        .unwrap();
        assert_eq!(env.text(), Some("Authentication required."));

        let env: Envelope = serde_json::from_value(serde_json::json!({
            "success": false, "message": "  ", "error": null
        }))
        .unwrap();
        assert_eq!(env.text(), None);
    }
}
