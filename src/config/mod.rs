//! Configuration types for the Magento API client.
//!
//! This module provides the configuration used to reach a Magento store
//! over REST and, optionally, the legacy XML-RPC API.
//!
//! # Overview
//!
//! - [`MagentoConfig`]: The main configuration struct
//! - [`MagentoConfigBuilder`]: A builder for constructing [`MagentoConfig`] instances
//! - [`Credentials`]: Username and password used for token and RPC logins
//! - [`StoreUrl`], [`StoreCode`], [`ApiUsername`], [`ApiPassword`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use magento_api::{MagentoConfig, StoreUrl, StoreCode, Credentials};
//!
//! let config = MagentoConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .store_code(StoreCode::new("default").unwrap())
//!     .credentials(Credentials::new("admin", "secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.rest_base_path(), "/rest/default/V1");
//! ```

mod newtypes;

pub use newtypes::{ApiPassword, ApiUsername, StoreCode, StoreUrl};

use crate::auth::AccessToken;
use crate::error::ConfigError;

/// Default path of the legacy XML-RPC endpoint, relative to the store URL.
pub const DEFAULT_RPC_ENDPOINT: &str = "index.php/api/xmlrpc/";

/// Username and password for a Magento user.
///
/// For REST these are exchanged for a bearer token; for the legacy RPC API
/// the password is the user's API key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// The user name.
    pub username: ApiUsername,
    /// The password or API key.
    pub password: ApiPassword,
}

impl Credentials {
    /// Creates validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] or [`ConfigError::EmptyPassword`]
    /// if either value is empty.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            username: ApiUsername::new(username)?,
            password: ApiPassword::new(password)?,
        })
    }
}

/// Configuration for the Magento API client.
///
/// # Thread Safety
///
/// `MagentoConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use magento_api::{MagentoConfig, StoreUrl};
///
/// let config = MagentoConfig::builder()
///     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
///     .verify_ssl(false)
///     .build()
///     .unwrap();
///
/// assert!(!config.verify_ssl());
/// assert_eq!(config.rest_base_path(), "/rest/V1");
/// ```
#[derive(Clone, Debug)]
pub struct MagentoConfig {
    store_url: StoreUrl,
    store_code: Option<StoreCode>,
    credentials: Option<Credentials>,
    access_token: Option<AccessToken>,
    verify_ssl: bool,
    user_agent_prefix: Option<String>,
    rpc_endpoint: Option<String>,
}

impl MagentoConfig {
    /// Creates a new builder for constructing a `MagentoConfig`.
    #[must_use]
    pub fn builder() -> MagentoConfigBuilder {
        MagentoConfigBuilder::new()
    }

    /// Returns the store URL.
    #[must_use]
    pub const fn store_url(&self) -> &StoreUrl {
        &self.store_url
    }

    /// Returns the store view code, if configured.
    #[must_use]
    pub const fn store_code(&self) -> Option<&StoreCode> {
        self.store_code.as_ref()
    }

    /// Returns the login credentials, if configured.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the pre-issued access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the legacy RPC endpoint path, if RPC is enabled.
    #[must_use]
    pub fn rpc_endpoint(&self) -> Option<&str> {
        self.rpc_endpoint.as_deref()
    }

    /// Returns the REST base path for this store, e.g. `/rest/default/V1`.
    #[must_use]
    pub fn rest_base_path(&self) -> String {
        self.store_code.as_ref().map_or_else(
            || "/rest/V1".to_string(),
            |code| format!("/rest/{}/V1", code.as_ref()),
        )
    }
}

// Verify MagentoConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MagentoConfig>();
};

/// Builder for constructing [`MagentoConfig`] instances.
///
/// `store_url` is the only required field.
///
/// # Defaults
///
/// - `store_code`: `None` (Magento's default store view)
/// - `verify_ssl`: `true`
/// - `credentials`, `access_token`, `user_agent_prefix`: `None`
/// - `rpc_endpoint`: `None` (legacy RPC disabled)
#[derive(Debug, Default)]
pub struct MagentoConfigBuilder {
    store_url: Option<StoreUrl>,
    store_code: Option<StoreCode>,
    credentials: Option<Credentials>,
    access_token: Option<AccessToken>,
    verify_ssl: Option<bool>,
    user_agent_prefix: Option<String>,
    rpc_endpoint: Option<String>,
}

impl MagentoConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store URL (required).
    #[must_use]
    pub fn store_url(mut self, url: StoreUrl) -> Self {
        self.store_url = Some(url);
        self
    }

    /// Sets the store view code used in REST paths.
    #[must_use]
    pub fn store_code(mut self, code: StoreCode) -> Self {
        self.store_code = Some(code);
        self
    }

    /// Sets the credentials used to obtain a bearer token and to open RPC sessions.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets a pre-issued bearer token (e.g. an integration access token).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Enables the legacy RPC API at the given path relative to the store URL.
    ///
    /// Use [`DEFAULT_RPC_ENDPOINT`] for a standard installation.
    #[must_use]
    pub fn rpc_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.rpc_endpoint = Some(endpoint.into());
        self
    }

    /// Builds the [`MagentoConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `store_url` is not set,
    /// or [`ConfigError::InvalidRpcEndpoint`] if the RPC endpoint is empty or
    /// an absolute URL.
    pub fn build(self) -> Result<MagentoConfig, ConfigError> {
        let store_url = self
            .store_url
            .ok_or(ConfigError::MissingRequiredField { field: "store_url" })?;

        let rpc_endpoint = self
            .rpc_endpoint
            .map(|endpoint| {
                let trimmed = endpoint.trim().trim_start_matches('/');
                if trimmed.is_empty() || trimmed.contains("://") {
                    Err(ConfigError::InvalidRpcEndpoint { endpoint })
                } else {
                    Ok(trimmed.to_string())
                }
            })
            .transpose()?;

        Ok(MagentoConfig {
            store_url,
            store_code: self.store_code,
            credentials: self.credentials,
            access_token: self.access_token,
            verify_ssl: self.verify_ssl.unwrap_or(true),
            user_agent_prefix: self.user_agent_prefix,
            rpc_endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_url() -> StoreUrl {
        StoreUrl::new("https://shop.example.com").unwrap()
    }

    #[test]
    fn test_builder_requires_store_url() {
        let result = MagentoConfigBuilder::new().build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "store_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = MagentoConfig::builder().store_url(store_url()).build().unwrap();

        assert!(config.verify_ssl());
        assert!(config.store_code().is_none());
        assert!(config.credentials().is_none());
        assert!(config.access_token().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert!(config.rpc_endpoint().is_none());
        assert_eq!(config.rest_base_path(), "/rest/V1");
    }

    #[test]
    fn test_rest_base_path_includes_store_code() {
        let config = MagentoConfig::builder()
            .store_url(store_url())
            .store_code(StoreCode::all())
            .build()
            .unwrap();

        assert_eq!(config.rest_base_path(), "/rest/all/V1");
    }

    #[test]
    fn test_rpc_endpoint_is_normalized() {
        let config = MagentoConfig::builder()
            .store_url(store_url())
            .rpc_endpoint("/index.php/api/xmlrpc/")
            .build()
            .unwrap();

        assert_eq!(config.rpc_endpoint(), Some(DEFAULT_RPC_ENDPOINT));
    }

    #[test]
    fn test_rpc_endpoint_rejects_absolute_url() {
        let result = MagentoConfig::builder()
            .store_url(store_url())
            .rpc_endpoint("https://other.example.com/api/xmlrpc")
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRpcEndpoint { .. })
        ));
    }

    #[test]
    fn test_credentials_validate_both_fields() {
        assert!(Credentials::new("admin", "secret").is_ok());
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(ConfigError::EmptyUsername)
        ));
        assert!(matches!(
            Credentials::new("admin", ""),
            Err(ConfigError::EmptyPassword)
        ));
    }

    #[test]
    fn test_config_debug_masks_password() {
        let config = MagentoConfig::builder()
            .store_url(store_url())
            .credentials(Credentials::new("admin", "top-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("MagentoConfig"));
        assert!(!debug_str.contains("top-secret"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MagentoConfig>();
    }
}
