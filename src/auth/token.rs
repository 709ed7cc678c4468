//! Bearer tokens for authenticated REST calls.
//!
//! Magento issues admin and customer tokens from its `integration/*/token`
//! endpoints. Since Magento 2.4.4 these are signed JWTs carrying an `exp`
//! claim; integration access tokens are opaque strings. [`AccessToken`]
//! reads the expiry when it can and otherwise treats the token as
//! non-expiring.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::ConfigError;

/// The kind of user a token is issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// An admin user (`integration/admin/token`).
    Admin,
    /// A storefront customer (`integration/customer/token`).
    Customer,
}

impl TokenKind {
    /// Returns the token-issuing resource path for this kind.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Admin => "integration/admin/token",
            Self::Customer => "integration/customer/token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Customer => f.write_str("customer"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    exp: Option<i64>,
}

/// A bearer token attached to authenticated REST requests.
///
/// # Security
///
/// The `Debug` implementation masks the token value.
///
/// # Example
///
/// ```rust
/// use magento_api::AccessToken;
///
/// let token = AccessToken::new("abc123").unwrap();
/// assert_eq!(token.header_value(), "Bearer abc123");
/// assert!(!token.expired());
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    issued_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a token, reading its expiry from the JWT `exp` claim if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        let expires_at = read_expiry(&token);
        Ok(Self {
            token,
            issued_at: Utc::now(),
            expires_at,
        })
    }

    /// Creates a token with an explicit expiry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn with_expiry(
        token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        let mut token = Self::new(token)?;
        token.expires_at = Some(expires_at);
        Ok(token)
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns when this value was created locally.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns when the token expires, if known.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns `true` if the token has expired.
    ///
    /// Tokens without a known expiry are never considered expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires_at.is_some_and(|expires| Utc::now() >= expires)
    }

    /// Returns `true` if the token expires within the given window.
    #[must_use]
    pub fn expires_within(&self, window: Duration) -> bool {
        self.expires_at
            .is_some_and(|expires| Utc::now() + window >= expires)
    }

    /// Returns the `Authorization` header value (`Bearer <token>`).
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// Reads the `exp` claim without verifying the signature.
///
/// The signing key lives on the Magento server; the claim is only used to
/// warn before sending a request that will be rejected.
fn read_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    Utc.timestamp_opt(data.claims.exp?, 0).single()
}

// Verify AccessToken is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        uid: u64,
        utypid: u8,
        iat: i64,
        exp: i64,
    }

    fn jwt(exp: DateTime<Utc>) -> String {
        let claims = Claims {
            uid: 1,
            utypid: 2,
            iat: Utc::now().timestamp(),
            exp: exp.timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"server-side-key"),
        )
        .unwrap()
    }

    #[test]
    fn test_opaque_token_has_no_expiry() {
        let token = AccessToken::new("kl3t5x8b0bq6mv0mkhe9h0m5sxu0a7ye").unwrap();
        assert!(token.expires_at().is_none());
        assert!(!token.expired());
        assert!(!token.expires_within(Duration::days(365)));
    }

    #[test]
    fn test_jwt_expiry_is_read_without_the_signing_key() {
        let exp = Utc::now() + Duration::hours(4);
        let token = AccessToken::new(jwt(exp)).unwrap();

        assert_eq!(token.expires_at().unwrap().timestamp(), exp.timestamp());
        assert!(!token.expired());
        assert!(token.expires_within(Duration::hours(5)));
        assert!(!token.expires_within(Duration::hours(3)));
    }

    #[test]
    fn test_expired_jwt_is_reported_expired() {
        let token = AccessToken::new(jwt(Utc::now() - Duration::minutes(1))).unwrap();
        assert!(token.expired());
    }

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(matches!(
            AccessToken::new("  "),
            Err(ConfigError::EmptyAccessToken)
        ));
    }

    #[test]
    fn test_with_expiry_overrides_claim() {
        let expires = Utc::now() - Duration::seconds(5);
        let token = AccessToken::with_expiry("opaque", expires).unwrap();
        assert!(token.expired());
    }

    #[test]
    fn test_header_value_and_debug_masking() {
        let token = AccessToken::new("secret-token").unwrap();
        assert_eq!(token.header_value(), "Bearer secret-token");

        let debug = format!("{token:?}");
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_token_kind_paths() {
        assert_eq!(TokenKind::Admin.path(), "integration/admin/token");
        assert_eq!(TokenKind::Customer.path(), "integration/customer/token");
        assert_eq!(TokenKind::Customer.to_string(), "customer");
    }
}
