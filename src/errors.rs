//! Unified error type for the console data layer.
//!
//! Every failure is local to the view that triggered it: the host turns an
//! [`Error`] into an error panel (with a manual retry) or a not-found panel,
//! and never treats one as fatal.

use thiserror::Error;

/// Message shown when the backend gives no usable explanation.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or fixture file problem
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A selector named a field the entity does not expose
    #[error("Unknown field '{field}' for {entity}")]
    UnknownField {
        /// Entity the selector was built for
        entity: &'static str,
        /// The offending field name
        field: String,
    },

    /// A value could not be parsed into one of the closed enumerations
    #[error("Invalid {kind} value '{value}'")]
    InvalidValue {
        /// Name of the enumeration
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// The backend answered 404, or a local lookup came back empty
    #[error("{resource} '{id}' not found")]
    NotFound {
        /// Kind of resource requested
        resource: &'static str,
        /// Identifier requested
        id: String,
    },

    /// Non-2xx status or `success: false` from the backend
    #[error("API error: {message}")]
    Api {
        /// HTTP status, when the failure came with one
        status: Option<u16>,
        /// Backend message or [`FALLBACK_MESSAGE`]
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Malformed response: {message}")]
    InvalidPayload {
        /// Decoder detail
        message: String,
    },

    /// Transport-level failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// `SeaORM` database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// True when the host should show the distinct "not found" panel.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Text the host displays in its error panel.
    ///
    /// Backend messages are surfaced as-is; transport and decoding failures
    /// collapse to [`FALLBACK_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::NotFound { resource, .. } => format!("The requested {resource} was not found."),
            Self::Http(_) | Self::InvalidPayload { .. } | Self::Database(_) => {
                FALLBACK_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_surfaces_backend_message() {
        let err = Error::Api {
            status: Some(500),
            message: "Analytics are being rebuilt".to_string(),
        };
        assert_eq!(err.user_message(), "Analytics are being rebuilt");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_is_distinct() {
        let err = Error::NotFound {
            resource: "route plan",
            id: "42".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "The requested route plan was not found.");
    }

    #[test]
    fn test_malformed_payload_uses_fallback() {
        let err = Error::InvalidPayload {
            message: "expected value at line 1".to_string(),
        };
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }
}
