//! Error types for the REST client

use indexmap::IndexMap;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("API returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// The response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status code, when the backend answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field-level validation messages from an error response, joined into one line
    #[must_use]
    pub fn field_messages(&self) -> Option<String> {
        match self {
            Self::Status { body, .. } => flatten_field_errors(body),
            _ => None,
        }
    }
}

/// Flatten a field-keyed error body into a single display string
///
/// The backend reports validation failures as `{"field": ["message", ...], ...}`. Every
/// message is collected in field order and joined with `", "`. Returns `None` when the
/// body is not a JSON object or holds no messages.
#[must_use]
pub fn flatten_field_errors(body: &str) -> Option<String> {
    let fields: IndexMap<String, serde_json::Value> = serde_json::from_str(body).ok()?;

    let mut messages = Vec::new();
    for value in fields.into_values() {
        match value {
            serde_json::Value::Array(items) => {
                messages.extend(items.into_iter().filter_map(message_text));
            }
            other => messages.extend(message_text(other)),
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(", "))
    }
}

fn message_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
