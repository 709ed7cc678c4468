//! REST client implementation for the Magento REST API.
//!
//! This module provides the [`RestClient`] type for making authenticated
//! REST API requests with path normalization.

use std::collections::HashMap;

use chrono::Duration;

use crate::auth::{request_token, AccessToken, TokenKind};
use crate::clients::rest::RestError;
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{Credentials, MagentoConfig};

/// Window before expiry in which requests log a warning.
const EXPIRY_WARNING_MINUTES: i64 = 5;

/// REST API client for a Magento store.
///
/// Provides convenient methods (`get`, `post`, `put`, `delete`, `patch`) for
/// making REST API requests. Every request carries
/// `Authorization: Bearer <token>`; calls made before a token is set fail
/// with [`RestError::MissingAccessToken`].
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use magento_api::{AccessToken, MagentoConfig, StoreUrl};
/// use magento_api::clients::RestClient;
///
/// let config = MagentoConfig::builder()
///     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
///     .build()
///     .unwrap();
///
/// let token = AccessToken::new("integration-token").unwrap();
/// let client = RestClient::new(&config, Some(token))?;
///
/// // GET request
/// let response = client.get("products/24-MB01", None).await?;
///
/// // PUT request with body
/// let body = serde_json::json!({"product": {"price": 34.0}});
/// let response = client.put("products/24-MB01", body, None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// The configuration this client was created from.
    config: MagentoConfig,
    /// The bearer token attached to every request.
    access_token: Option<AccessToken>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client for the configured store.
    ///
    /// `token` takes precedence over [`MagentoConfig::access_token`]. Passing
    /// `None` with no configured token creates an unauthenticated client;
    /// call [`login`](Self::login) or [`set_access_token`](Self::set_access_token)
    /// before making requests.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &MagentoConfig, token: Option<AccessToken>) -> Result<Self, RestError> {
        let base_path = config.rest_base_path();
        tracing::debug!(
            "Creating REST client for {}{}",
            config.store_url(),
            base_path
        );

        let http_client = HttpClient::new(base_path, config)?;
        let access_token = token.or_else(|| config.access_token().cloned());

        Ok(Self {
            http_client,
            config: config.clone(),
            access_token,
        })
    }

    /// Returns the REST base path, e.g. `/rest/default/V1`.
    #[must_use]
    pub fn base_path(&self) -> &str {
        self.http_client.base_path()
    }

    /// Returns the configuration this client was created from.
    #[must_use]
    pub const fn config(&self) -> &MagentoConfig {
        &self.config
    }

    /// Returns the current bearer token, if set.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Replaces the bearer token used for subsequent requests.
    pub fn set_access_token(&mut self, token: AccessToken) {
        self.access_token = Some(token);
    }

    /// Exchanges admin credentials for a bearer token and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Auth`] if the token request fails.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), RestError> {
        self.login_as(credentials, TokenKind::Admin).await
    }

    /// Exchanges credentials for a token of the given kind and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Auth`] if the token request fails.
    pub async fn login_as(
        &mut self,
        credentials: &Credentials,
        kind: TokenKind,
    ) -> Result<(), RestError> {
        let token = request_token(&self.config, credentials, kind).await?;
        tracing::debug!("Obtained {} token, expires at {:?}", kind, token.expires_at());
        self.access_token = Some(token);
        Ok(())
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The REST API path (e.g., "customers/1")
    /// * `query` - Optional query parameters
    ///
    /// # Errors
    ///
    /// Returns [`RestError::MissingAccessToken`] if no token is set,
    /// [`RestError::InvalidPath`] if the path is invalid, and
    /// [`RestError::Http`] for HTTP-level errors.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a GET request and returns only the decoded body.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn get_json(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<serde_json::Value, RestError> {
        Ok(self.get(path, query).await?.body)
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let body = serde_json::json!({"customer": {"email": "jdoe@example.com"}});
    /// let response = client.post("customers", body, None).await?;
    /// ```
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), query)
            .await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query)
            .await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query)
            .await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Patch, path, Some(body), query)
            .await
    }

    /// Internal helper to build and send requests.
    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let token = self
            .access_token
            .as_ref()
            .ok_or(RestError::MissingAccessToken)?;

        if token.expired() {
            tracing::warn!("Access token expired at {:?}", token.expires_at());
        } else if token.expires_within(Duration::minutes(EXPIRY_WARNING_MINUTES)) {
            tracing::warn!("Access token expires soon, at {:?}", token.expires_at());
        }

        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, &normalized_path)
            .header("Authorization", token.header_value());

        if let Some(body_value) = body {
            builder = builder.body(body_value).body_type(DataType::Json);
        }

        if let Some(query_params) = query {
            builder = builder.query(query_params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Normalizes a REST API path.
///
/// Leading `/` characters are stripped. Empty paths and paths carrying their
/// own query string are rejected; query parameters go in the `query` map.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim_start_matches('/');

    if trimmed.is_empty() || trimmed.contains('?') {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StoreCode, StoreUrl};
    use chrono::Utc;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(url: &str) -> MagentoConfig {
        MagentoConfig::builder()
            .store_url(StoreUrl::new(url).unwrap())
            .build()
            .unwrap()
    }

    fn token() -> AccessToken {
        AccessToken::new("test-token").unwrap()
    }

    // === Path Normalization Tests ===

    #[test]
    fn test_normalize_path_strips_leading_slash() {
        assert_eq!(normalize_path("/customers/1").unwrap(), "customers/1");
        assert_eq!(normalize_path("//customers").unwrap(), "customers");
    }

    #[test]
    fn test_normalize_path_keeps_nested_paths() {
        assert_eq!(
            normalize_path("products/attribute-sets/4/attributes").unwrap(),
            "products/attribute-sets/4/attributes"
        );
    }

    #[test]
    fn test_normalize_path_rejects_empty_path() {
        assert!(matches!(
            normalize_path(""),
            Err(RestError::InvalidPath { .. })
        ));
        assert!(matches!(
            normalize_path("/"),
            Err(RestError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_normalize_path_rejects_inline_query_string() {
        assert!(matches!(
            normalize_path("categories?rootCategoryId=2"),
            Err(RestError::InvalidPath { path }) if path == "categories?rootCategoryId=2"
        ));
    }

    // === Construction Tests ===

    #[test]
    fn test_rest_client_uses_store_code_in_base_path() {
        let config = MagentoConfig::builder()
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .store_code(StoreCode::new("default").unwrap())
            .build()
            .unwrap();

        let client = RestClient::new(&config, None).unwrap();
        assert_eq!(client.base_path(), "/rest/default/V1");
        assert!(client.access_token().is_none());
    }

    #[test]
    fn test_explicit_token_overrides_configured_token() {
        let config = MagentoConfig::builder()
            .store_url(StoreUrl::new("https://shop.example.com").unwrap())
            .access_token(AccessToken::new("from-config").unwrap())
            .build()
            .unwrap();

        let client = RestClient::new(&config, None).unwrap();
        assert_eq!(client.access_token().unwrap().as_str(), "from-config");

        let client = RestClient::new(&config, Some(AccessToken::new("explicit").unwrap())).unwrap();
        assert_eq!(client.access_token().unwrap().as_str(), "explicit");
    }

    #[test]
    fn test_rest_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestClient>();
    }

    // === Request Tests ===

    #[tokio::test]
    async fn test_request_without_token_fails_before_sending() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = RestClient::new(&config_for(&mock_server.uri()), None).unwrap();
        let result = client.get("customers/1", None).await;

        assert!(matches!(result, Err(RestError::MissingAccessToken)));
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_header_and_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/V1/categories/5"))
            .and(query_param("storeId", "1"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RestClient::new(&config_for(&mock_server.uri()), Some(token())).unwrap();
        let mut query = HashMap::new();
        query.insert("storeId".to_string(), "1".to_string());

        let body = client.get_json("categories/5", Some(query)).await.unwrap();
        assert_eq!(body, json!({"id": 5}));
    }

    #[tokio::test]
    async fn test_write_verbs_send_json_body() {
        let mock_server = MockServer::start().await;

        for verb in ["POST", "PUT", "PATCH"] {
            Mock::given(method(verb))
                .and(path("/rest/V1/things"))
                .and(header("Content-Type", "application/json"))
                .and(body_json(json!({"thing": {"name": verb}})))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!(verb)))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = RestClient::new(&config_for(&mock_server.uri()), Some(token())).unwrap();

        let post = client
            .post("things", json!({"thing": {"name": "POST"}}), None)
            .await
            .unwrap();
        let put = client
            .put("things", json!({"thing": {"name": "PUT"}}), None)
            .await
            .unwrap();
        let patch = client
            .patch("/things", json!({"thing": {"name": "PATCH"}}), None)
            .await
            .unwrap();

        assert_eq!(post.body, json!("POST"));
        assert_eq!(put.body, json!("PUT"));
        assert_eq!(patch.body, json!("PATCH"));
    }

    #[tokio::test]
    async fn test_delete_returns_boolean_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/V1/products/24-MB01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RestClient::new(&config_for(&mock_server.uri()), Some(token())).unwrap();
        let response = client.delete("products/24-MB01", None).await.unwrap();

        assert_eq!(response.body, json!(true));
    }

    #[tokio::test]
    async fn test_expired_token_is_still_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/V1/store/storeViews"))
            .and(header("Authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "The consumer isn't authorized to access %resources.",
                "parameters": {"resources": "Magento_Store::store"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let expired = AccessToken::with_expiry("stale", Utc::now() - Duration::hours(1)).unwrap();
        let client = RestClient::new(&config_for(&mock_server.uri()), Some(expired)).unwrap();

        let error = client.get("store/storeViews", None).await.unwrap_err();
        assert_eq!(error.status(), Some(401));
        assert_eq!(
            error.to_string(),
            "HTTP 401: The consumer isn't authorized to access Magento_Store::store."
        );
    }

    #[tokio::test]
    async fn test_login_stores_token_for_subsequent_requests() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/V1/integration/admin/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("fresh-token")))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/V1/directory/countries"))
            .and(header("Authorization", "Bearer fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut client = RestClient::new(&config_for(&mock_server.uri()), None).unwrap();
        client
            .login(&Credentials::new("admin", "secret").unwrap())
            .await
            .unwrap();

        assert_eq!(client.access_token().unwrap().as_str(), "fresh-token");
        let response = client.get("directory/countries", None).await.unwrap();
        assert_eq!(response.body, json!([]));
    }
}
