//! Resource-level error types.
//!
//! [`ResourceError`] wraps the transport errors and adds the failures that
//! only endpoint methods can produce: a result that cannot be coerced to the
//! documented type, an RPC-backed method used without an RPC client, and
//! arguments that cannot be turned into a request.
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::resources::ResourceError;
//!
//! match magento.customers().create(json!({"email": "jdoe@example.com"})).await {
//!     Ok(id) => println!("Created customer {id}"),
//!     Err(ResourceError::UnexpectedResponse { operation, expected, body }) => {
//!         println!("{operation} returned {body}, expected {expected}");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::auth::AuthError;
use crate::clients::{RestError, RpcError};
use thiserror::Error;

/// Error type for endpoint methods.
///
/// # Example
///
/// ```rust
/// use magento_api::resources::ResourceError;
///
/// let error = ResourceError::RpcUnavailable {
///     method: "catalog_category.move",
/// };
/// assert!(error.to_string().contains("catalog_category.move"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),

    /// An XML-RPC error occurred.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Obtaining credentials or a token failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// An RPC-backed method was called but no RPC client is available.
    #[error("{method} requires the legacy RPC API, which is not configured")]
    RpcUnavailable {
        /// The RPC method that was needed.
        method: &'static str,
    },

    /// The response could not be coerced to the documented result type.
    #[error("{operation} returned {body}, expected {expected}")]
    UnexpectedResponse {
        /// The endpoint operation (e.g., "customers.create").
        operation: &'static str,
        /// The expected result type (e.g., "an integer id").
        expected: &'static str,
        /// The response body, as JSON text.
        body: String,
    },

    /// An argument could not be turned into a request.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: String,
    },
}

impl ResourceError {
    /// Returns the HTTP status code of a failed REST response, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rest(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the RPC fault, if the error is one.
    #[must_use]
    pub const fn fault(&self) -> Option<&crate::clients::RpcFault> {
        match self {
            Self::Rpc(RpcError::Fault(fault)) => Some(fault),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
