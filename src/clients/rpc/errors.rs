//! XML-RPC error types.

use crate::clients::HttpError;
use thiserror::Error;

/// A fault returned by the XML-RPC server.
///
/// Returned whole as [`RpcError::Fault`], or per entry from
/// [`RpcClient::multi_call`](crate::clients::RpcClient::multi_call).
///
/// # Example
///
/// ```rust
/// use magento_api::clients::RpcFault;
///
/// let fault = RpcFault { code: 101, message: "Product not exists.".to_string() };
/// assert_eq!(fault.to_string(), "XML-RPC fault 101: Product not exists.");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("XML-RPC fault {code}: {message}")]
pub struct RpcFault {
    /// The `faultCode`.
    pub code: i64,
    /// The `faultString` (or `faultMessage` inside `multiCall` results).
    pub message: String,
}

/// Error type for legacy XML-RPC operations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// No RPC endpoint is configured.
    #[error("The legacy RPC API is not configured. Set MagentoConfigBuilder::rpc_endpoint().")]
    NotConfigured,

    /// A call was made without an open session.
    #[error("No RPC session. Call login() before making RPC calls.")]
    NotConnected,

    /// The server answered with a fault.
    #[error(transparent)]
    Fault(#[from] RpcFault),

    /// The response was not a well-formed XML-RPC document.
    #[error("Malformed XML-RPC response: {reason}")]
    MalformedResponse {
        /// What was wrong with the response.
        reason: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify RpcError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RpcError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_is_transparent() {
        let error: RpcError = RpcFault {
            code: 2,
            message: "Access denied.".to_string(),
        }
        .into();

        assert_eq!(error.to_string(), "XML-RPC fault 2: Access denied.");
    }

    #[test]
    fn test_malformed_response_message() {
        let error = RpcError::MalformedResponse {
            reason: "missing <params>".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed XML-RPC response: missing <params>"
        );
    }
}
