//! # Errors
//!
//! Failure taxonomy for calls that leave the process (record store, message sending).
//! User-input problems are not errors here: handlers answer them with a specific reply.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Required credentials or addressing (api key, base, table, bot token) are unset.
    #[error("not configured: {0}")]
    Configuration(String),

    /// The external call returned a non-success status or could not complete.
    #[error("{context}: {message}")]
    Transport { context: String, message: String },
}

impl Error {
    #[must_use]
    pub fn configuration(what: impl Into<String>) -> Self {
        Self::Configuration(what.into())
    }

    #[must_use]
    pub fn transport(context: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Transport {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display_includes_context() {
        let err = Error::transport("airtable create", "HTTP 422: INVALID_VALUE");
        assert_eq!(err.to_string(), "airtable create: HTTP 422: INVALID_VALUE");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_flag() {
        assert!(Error::configuration("AIRTABLE_API_KEY").is_configuration());
    }
}
