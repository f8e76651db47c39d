//! Mimir error types

use crate::key::ServiceKey;

/// Mimir error types
#[derive(Debug, thiserror::Error)]
pub enum MimirError {
    // Configuration errors
    /// A locator descriptor was installed without the full two-method
    /// shape. The registry leaves the previous resolver active.
    #[error("locator object does not expose `{missing}`")]
    LocatorIncomplete { missing: &'static str },

    #[error("configuration error: {0}")]
    Configuration(String),

    // Per-lookup errors
    /// A resolution strategy failed to produce a value for a key.
    ///
    /// The memoizing cache never retains this state: the key stays
    /// eligible for resolution on the next call.
    #[error("resolution failed for `{key}`: {message}")]
    Resolution {
        key: &'static str,
        message: String,
    },
}

impl MimirError {
    /// Build a [`Resolution`](MimirError::Resolution) error for a key.
    pub fn resolution(key: ServiceKey, message: impl Into<String>) -> Self {
        MimirError::Resolution {
            key: key.name(),
            message: message.into(),
        }
    }

    /// Whether this error was raised at install/configuration time
    /// (as opposed to during a lookup).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MimirError::LocatorIncomplete { .. } | MimirError::Configuration(_)
        )
    }
}

/// Result type alias for Mimir operations
pub type Result<T> = std::result::Result<T, MimirError>;
