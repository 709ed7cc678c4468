//! Authentication error types.

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur while obtaining a bearer token.
///
/// # Example
///
/// ```rust
/// use magento_api::auth::AuthError;
///
/// let error = AuthError::TokenRequestFailed {
///     status: 401,
///     message: "The account sign-in was incorrect".to_string(),
/// };
/// assert!(error.to_string().contains("401"));
/// ```
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credentials are configured for a login.
    #[error("No credentials configured. Set them with MagentoConfigBuilder::credentials().")]
    MissingCredentials,

    /// The token endpoint rejected the request or could not be reached.
    ///
    /// `status` is 0 for network failures.
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// The token endpoint answered with something other than a token string.
    #[error("Invalid token response: {reason}")]
    InvalidTokenResponse {
        /// Why the response could not be used.
        reason: String,
    },

    /// The HTTP client could not be created or the request was invalid.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_message() {
        let message = AuthError::MissingCredentials.to_string();
        assert!(message.contains("credentials"));
    }

    #[test]
    fn test_invalid_token_response_message() {
        let error = AuthError::InvalidTokenResponse {
            reason: "expected a JSON string".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid token response: expected a JSON string"
        );
    }
}
