//! Authentication types for the Magento API client.
//!
//! Magento authenticates REST calls with a bearer token. Tokens are either
//! issued up front (integration access tokens) or obtained by exchanging a
//! username and password.
//!
//! # Overview
//!
//! - [`AccessToken`]: A bearer token with masked debug output and expiry tracking
//! - [`TokenKind`]: Admin or customer token
//! - [`request_admin_token`] / [`request_customer_token`]: Token exchange
//! - [`AuthError`]: Errors raised during token exchange
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::auth::request_admin_token;
//!
//! let token = request_admin_token(&config, &credentials).await?;
//! let client = RestClient::new(&config, Some(token))?;
//! ```

mod error;
mod login;
mod token;

pub use error::AuthError;
pub use login::{request_admin_token, request_customer_token, request_token};
pub use token::{AccessToken, TokenKind};
