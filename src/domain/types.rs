//! # Domain Types
//!
//! Common data structures and enums used across the application logic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment method a record is keyed by. At most one record exists per provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    JazzCash,
    EasyPaisa,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::JazzCash, Provider::EasyPaisa];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::JazzCash => "jazzcash",
            Provider::EasyPaisa => "easypaisa",
        }
    }

    /// Case-insensitive lookup of a provider label.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub provider: Provider,
    pub details: String,
}

impl PaymentRecord {
    pub fn new(provider: Provider, details: impl Into<String>) -> Self {
        Self {
            provider,
            details: details.into(),
        }
    }
}

/// Who sent an inbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub first_name: Option<String>,
    pub username: Option<String>,
}

/// Transport-independent view of one inbound chat event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub chat_id: String,
    pub sender: Option<Sender>,
    pub text: String,
}

impl InboundMessage {
    pub fn sender_id(&self) -> Option<String> {
        self.sender.as_ref().map(|s| s.id.to_string())
    }
}

/// How an empty admin allow-list is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminPolicy {
    /// Empty allow-list: every sender is an admin.
    #[default]
    OpenIfEmpty,
    /// Empty allow-list: nobody is an admin.
    Strict,
}

/// Formatting hint for outbound text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Markdown,
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_lookup_ignores_case() {
        assert_eq!(Provider::from_str("jazzcash"), Some(Provider::JazzCash));
        assert_eq!(Provider::from_str("EasyPaisa"), Some(Provider::EasyPaisa));
        assert_eq!(Provider::from_str("bitcoin"), None);
        assert_eq!(Provider::from_str(""), None);
    }

    #[test]
    fn test_provider_serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&Provider::EasyPaisa).unwrap();
        assert_eq!(json, "\"easypaisa\"");
    }
}
