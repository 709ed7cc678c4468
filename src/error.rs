//! Error types for the Magento API client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use magento_api::{ApiUsername, ConfigError};
//!
//! let result = ApiUsername::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUsername)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide a Magento admin or customer username.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the password or API key for the user.")]
    EmptyPassword,

    /// Access token cannot be empty.
    #[error("Access token cannot be empty.")]
    EmptyAccessToken,

    /// Store URL is invalid.
    #[error("Invalid store URL '{url}'. Please provide a URL with scheme (e.g., 'https://shop.example.com').")]
    InvalidStoreUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Store code is invalid.
    #[error("Invalid store code '{code}'. Store codes contain only lowercase letters, digits and underscores.")]
    InvalidStoreCode {
        /// The invalid store code that was provided.
        code: String,
    },

    /// RPC endpoint path is invalid.
    #[error("Invalid RPC endpoint '{endpoint}'. Expected a path relative to the store URL (e.g., 'index.php/api/xmlrpc/').")]
    InvalidRpcEndpoint {
        /// The invalid endpoint that was provided.
        endpoint: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
