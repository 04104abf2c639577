//! # ROUTER CONFIGURATION
//!
//! **PURPOSE**: Path normalization settings shared by registration and lookup.

use crate::errors::{error_codes, RouterError};
use serde::{Deserialize, Serialize};

/// **ROUTER OPTIONS**
///
/// - `strict`: when `false`, trailing slashes are trimmed and a single
///   leading slash is enforced before a path touches the tree.
/// - `prefix`: prepended to every registered and looked-up path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// **STRICT MODE** - Use paths exactly as given
    pub strict: bool,

    /// **PATH PREFIX** - Mount point for every route
    pub prefix: String,
}

impl RouterOptions {
    /// **CONSTRUCTOR** - Non-strict, no prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// **WITH STRICT MODE**
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// **WITH PREFIX**
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// **LOAD FROM JSON**
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(source: &str) -> Result<Self, RouterError> {
        serde_json::from_str(source).map_err(|e| RouterError::Configuration {
            code: error_codes::INVALID_OPTIONS.to_string(),
            message: format!("Invalid router options: {}", e),
        })
    }
}
