//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Magento username.
///
/// Used both for admin token requests and for legacy RPC `login`, where it
/// names the API user.
///
/// # Example
///
/// ```rust
/// use magento_api::ApiUsername;
///
/// let username = ApiUsername::new("admin").unwrap();
/// assert_eq!(username.as_ref(), "admin");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUsername(String);

impl ApiUsername {
    /// Creates a new validated username.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty.
    pub fn new(username: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for ApiUsername {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Magento password or legacy API key.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `ApiPassword(*****)`.
///
/// ```rust
/// use magento_api::ApiPassword;
///
/// let password = ApiPassword::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "ApiPassword(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiPassword(String);

impl ApiPassword {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for ApiPassword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiPassword(*****)")
    }
}

/// A validated base URL of a Magento installation.
///
/// The URL must use the `http` or `https` scheme and have a non-empty host.
/// Trailing slashes are removed so that resource paths can be joined with a
/// single `/`.
///
/// # Example
///
/// ```rust
/// use magento_api::StoreUrl;
///
/// let url = StoreUrl::new("https://shop.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://shop.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "shop.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl StoreUrl {
    /// Creates a new validated store URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidStoreUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ConfigError::InvalidStoreUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidStoreUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start || url.contains(['?', '#']) {
            return Err(ConfigError::InvalidStoreUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns `true` if the URL uses plain `http`.
    #[must_use]
    pub fn is_insecure(&self) -> bool {
        self.scheme().eq_ignore_ascii_case("http")
    }
}

impl AsRef<str> for StoreUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated Magento store view code.
///
/// Store codes scope REST calls to a store view: `/rest/{code}/V1/...`.
/// The special code `all` addresses every store view at once.
///
/// # Example
///
/// ```rust
/// use magento_api::StoreCode;
///
/// let code = StoreCode::new("default").unwrap();
/// assert_eq!(code.as_ref(), "default");
/// assert!(StoreCode::new("Default View").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreCode(String);

impl StoreCode {
    /// Code addressing all store views.
    pub const ALL: &'static str = "all";

    /// Creates a new validated store code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStoreCode`] if the code is empty or
    /// contains characters other than lowercase letters, digits and `_`.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();
        let valid = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(ConfigError::InvalidStoreCode { code });
        }
        Ok(Self(code))
    }

    /// Returns the code addressing all store views.
    #[must_use]
    pub fn all() -> Self {
        Self(Self::ALL.to_string())
    }
}

impl AsRef<str> for StoreCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for StoreCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StoreCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rejects_empty_string() {
        assert!(matches!(ApiUsername::new(""), Err(ConfigError::EmptyUsername)));
        assert!(matches!(ApiUsername::new("  "), Err(ConfigError::EmptyUsername)));
    }

    #[test]
    fn test_password_masks_value_in_debug() {
        let password = ApiPassword::new("super-secret").unwrap();
        let debug_output = format!("{:?}", password);
        assert_eq!(debug_output, "ApiPassword(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_password_rejects_empty_string() {
        assert!(matches!(ApiPassword::new(""), Err(ConfigError::EmptyPassword)));
    }

    #[test]
    fn test_store_url_strips_trailing_slashes() {
        let url = StoreUrl::new("https://shop.example.com//").unwrap();
        assert_eq!(url.as_ref(), "https://shop.example.com");
    }

    #[test]
    fn test_store_url_keeps_port_and_path() {
        let url = StoreUrl::new("http://localhost:8080/magento").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "localhost");
        assert!(url.is_insecure());
        assert_eq!(url.as_ref(), "http://localhost:8080/magento");
    }

    #[test]
    fn test_store_url_rejects_invalid() {
        assert!(StoreUrl::new("shop.example.com").is_err());
        assert!(StoreUrl::new("https://").is_err());
        assert!(StoreUrl::new("ftp://shop.example.com").is_err());
        assert!(StoreUrl::new("https://shop.example.com/?a=b").is_err());
    }

    #[test]
    fn test_store_url_deserializes_with_validation() {
        let url: StoreUrl = serde_json::from_str(r#""https://shop.example.com/""#).unwrap();
        assert_eq!(url.as_ref(), "https://shop.example.com");

        let invalid: Result<StoreUrl, _> = serde_json::from_str(r#""not a url""#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_store_code_validation() {
        assert!(StoreCode::new("default").is_ok());
        assert!(StoreCode::new("de_store2").is_ok());
        assert_eq!(StoreCode::all().as_ref(), "all");

        assert!(StoreCode::new("").is_err());
        assert!(StoreCode::new("Default").is_err());
        assert!(StoreCode::new("de-store").is_err());
        assert!(StoreCode::new("de/store").is_err());
    }
}
