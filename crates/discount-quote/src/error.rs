//! # Quote Error Types
//!
//! Errors raised by the boundary itself. Pricing failures stay inside
//! [`Outcome`](discount_core::Outcome) and are turned into replies, not errors.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quote Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────────────┐        ┌─────────────────────────────┐    │
//! │  │     Configuration       │        │       Serialization         │    │
//! │  │                         │        │                             │    │
//! │  │  InvalidConfig          │        │  SerializationFailed        │    │
//! │  │  ConfigLoadFailed       │        │                             │    │
//! │  │  ConfigSaveFailed       │        │                             │    │
//! │  └─────────────────────────┘        └─────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for boundary operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Debug, Error)]
pub enum QuoteError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration parsed but is not usable.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Serialization Errors
    // =========================================================================
    /// Failed to render a reply.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::SerializationFailed(err.to_string())
    }
}

impl From<std::io::Error> for QuoteError {
    fn from(err: std::io::Error) -> Self {
        QuoteError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for QuoteError {
    fn from(err: toml::de::Error) -> Self {
        QuoteError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for QuoteError {
    fn from(err: toml::ser::Error) -> Self {
        QuoteError::ConfigSaveFailed(err.to_string())
    }
}

impl QuoteError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            QuoteError::InvalidConfig(_) | QuoteError::ConfigLoadFailed(_) | QuoteError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors() {
        assert!(QuoteError::InvalidConfig("cap".into()).is_config_error());
        assert!(!QuoteError::SerializationFailed("bad".into()).is_config_error());
    }

    #[test]
    fn test_toml_error_converts_to_load_failure() {
        let err: QuoteError = toml::from_str::<toml::Table>("not = [valid").unwrap_err().into();
        assert!(matches!(err, QuoteError::ConfigLoadFailed(_)));
        assert!(err.to_string().starts_with("Failed to load config"));
    }
}
