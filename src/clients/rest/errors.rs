//! REST-specific error types for the Magento API client.
//!
//! - [`RestError::MissingAccessToken`]: An authenticated call was made before a token was set
//! - [`RestError::InvalidPath`]: When a REST API path fails validation
//! - [`RestError::Http`]: Wraps underlying HTTP errors
//! - [`RestError::Auth`]: A token exchange failed during [`login`](crate::clients::RestClient::login)
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::clients::{RestClient, RestError};
//!
//! match client.get("customers/1", None).await {
//!     Ok(response) => println!("Customer: {}", response.body),
//!     Err(RestError::MissingAccessToken) => println!("Call login() first"),
//!     Err(RestError::InvalidPath { path }) => println!("Invalid path: {path}"),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use crate::auth::AuthError;
use crate::clients::HttpError;
use thiserror::Error;

/// Error type for REST API operations.
///
/// # Example
///
/// ```rust
/// use magento_api::clients::RestError;
///
/// let error = RestError::InvalidPath { path: "".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// No bearer token is set on the client.
    #[error("No access token set. Configure one or call login() before making requests.")]
    MissingAccessToken,

    /// The REST API path is invalid.
    ///
    /// Returned when a path is empty after normalization or carries its own
    /// query string.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Obtaining a bearer token failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl RestError {
    /// Returns the HTTP status code of a failed response, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

// Verify RestError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestError>();
};
