//! Transport-agnostic domain error.
//!
//! Every failure crossing a port is reduced to a human-readable message.
//! Inbound adapters decide how to surface it; this system's HTTP contract
//! maps every domain error to a 500 response carrying the message.

use serde::{Deserialize, Serialize};

/// Human-readable failure reduced from a port error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainError {
    message: String,
}

impl DomainError {
    /// Wrap a message in a domain error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message shown to callers.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn serialises_as_a_message_object() {
        let err = DomainError::new("database unavailable");
        let value = serde_json::to_value(&err).expect("error serialises");
        assert_eq!(value, json!({ "message": "database unavailable" }));
    }

    #[rstest]
    fn display_is_the_bare_message() {
        assert_eq!(DomainError::new("boom").to_string(), "boom");
    }
}
