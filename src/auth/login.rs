//! Bearer token exchange.
//!
//! Magento exchanges a username and password for a bearer token at
//! `POST /rest/V1/integration/{admin,customer}/token`. The response body is
//! the token as a bare JSON string.
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::{MagentoConfig, StoreUrl, Credentials};
//! use magento_api::auth::request_admin_token;
//!
//! let config = MagentoConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let credentials = Credentials::new("admin", "secret").unwrap();
//! let token = request_admin_token(&config, &credentials).await?;
//! ```

use serde::Serialize;

use crate::auth::{AccessToken, AuthError, TokenKind};
use crate::clients::{DataType, HttpClient, HttpError, HttpMethod, HttpRequest};
use crate::config::{Credentials, MagentoConfig};

/// Request body for a token exchange.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Requests an admin bearer token.
///
/// # Errors
///
/// - [`AuthError::TokenRequestFailed`] if Magento rejects the credentials or
///   cannot be reached
/// - [`AuthError::InvalidTokenResponse`] if the body is not a token string
pub async fn request_admin_token(
    config: &MagentoConfig,
    credentials: &Credentials,
) -> Result<AccessToken, AuthError> {
    request_token(config, credentials, TokenKind::Admin).await
}

/// Requests a customer bearer token.
///
/// # Errors
///
/// Same as [`request_admin_token`].
pub async fn request_customer_token(
    config: &MagentoConfig,
    credentials: &Credentials,
) -> Result<AccessToken, AuthError> {
    request_token(config, credentials, TokenKind::Customer).await
}

/// Requests a bearer token of the given kind.
///
/// # Errors
///
/// Same as [`request_admin_token`].
pub async fn request_token(
    config: &MagentoConfig,
    credentials: &Credentials,
    kind: TokenKind,
) -> Result<AccessToken, AuthError> {
    tracing::debug!(
        "Requesting {} token for user {}",
        kind,
        credentials.username.as_ref()
    );

    let client = HttpClient::new(config.rest_base_path(), config)?;

    let body = TokenRequest {
        username: credentials.username.as_ref(),
        password: credentials.password.as_ref(),
    };
    let body = serde_json::to_value(&body).map_err(|e| AuthError::InvalidTokenResponse {
        reason: format!("Failed to encode token request: {e}"),
    })?;

    let request = HttpRequest::builder(HttpMethod::Post, kind.path())
        .body(body)
        .body_type(DataType::Json)
        .build()
        .map_err(HttpError::from)?;

    let response = client.request(request).await.map_err(|e| match e {
        HttpError::Response(e) => AuthError::TokenRequestFailed {
            status: e.code,
            message: e.message,
        },
        HttpError::Network(e) => AuthError::TokenRequestFailed {
            status: 0,
            message: format!("Network error: {e}"),
        },
        other => AuthError::Http(other),
    })?;

    let token = response
        .body
        .as_str()
        .ok_or_else(|| AuthError::InvalidTokenResponse {
            reason: format!("expected a JSON string, got {}", response.body),
        })?;

    AccessToken::new(token).map_err(|e| AuthError::InvalidTokenResponse {
        reason: e.to_string(),
    })
}
