//! Error types and stable error codes.

use thiserror::Error;

/// Errors raised while building a router.
///
/// Lookups never fail; a miss is reported through
/// [`NoMatch`](crate::routing::NoMatch) instead.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A path template or method name was rejected at registration.
    #[error("VALIDATION ERROR: {code} - {message}")]
    Validation {
        /// One of [`error_codes`].
        code: String,
        /// Human-readable detail naming the offending input.
        message: String,
    },

    /// Router options could not be loaded.
    #[error("CONFIGURATION ERROR: {code} - {message}")]
    Configuration {
        /// One of [`error_codes`].
        code: String,
        /// Parser message for the rejected options.
        message: String,
    },
}

impl RouterError {
    pub(crate) fn validation(code: &str, message: impl Into<String>) -> Self {
        RouterError::Validation {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code of this error.
    pub fn code(&self) -> &str {
        match self {
            RouterError::Validation { code, .. } | RouterError::Configuration { code, .. } => code,
        }
    }
}

/// **ROUTING ERROR CODES**
///
/// **MANDATE**: Use these standardized error codes for consistent error reporting.
pub mod error_codes {
    /// `:` not followed by a name.
    pub const EMPTY_PARAM_NAME: &str = "RUST_CORE_ROUTING_EMPTY_PARAM_NAME";
    /// Parameter name containing `:` or `*`.
    pub const INVALID_PARAM_NAME: &str = "RUST_CORE_ROUTING_INVALID_PARAM_NAME";
    /// Same name declared twice in one template.
    pub const DUPLICATE_PARAM_NAME: &str = "RUST_CORE_ROUTING_DUPLICATE_PARAM_NAME";
    /// `***` or a `*` that does not span a whole segment.
    pub const INVALID_WILDCARD: &str = "RUST_CORE_ROUTING_INVALID_WILDCARD";
    /// Deep-wildcard suffix that does not compile.
    pub const INVALID_ROUTE_PATTERN: &str = "RUST_CORE_ROUTING_INVALID_ROUTE_PATTERN";
    /// Method that is not an HTTP token.
    pub const INVALID_HTTP_METHOD: &str = "RUST_CORE_ROUTING_INVALID_HTTP_METHOD";
    /// Malformed [`RouterOptions`](crate::config::RouterOptions) JSON.
    pub const INVALID_OPTIONS: &str = "RUST_CORE_ROUTING_INVALID_OPTIONS";
}
