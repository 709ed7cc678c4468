//! HTTP client for Magento API communication.
//!
//! This module provides the [`HttpClient`] type, the transport shared by the
//! REST client, the token exchange and the legacy XML-RPC client.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{DataType, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::MagentoConfig;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to a Magento store.
///
/// The client handles:
/// - Base URI construction from the configured store URL
/// - Default headers including User-Agent and Accept
/// - TLS verification according to [`MagentoConfig::verify_ssl`]
/// - Rendering Magento's error payloads into readable messages
///
/// Authentication is not handled here; callers add the `Authorization`
/// header per request.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use magento_api::{MagentoConfig, StoreUrl};
/// use magento_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = MagentoConfig::builder()
///     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(config.rest_base_path(), &config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "directory/countries")
///     .build()
///     .unwrap();
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://shop.example.com`).
    base_uri: String,
    /// Base path (e.g., "/rest/default/V1").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client rooted at `base_path` on the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(base_path: impl Into<String>, config: &MagentoConfig) -> Result<Self, HttpError> {
        let base_path = base_path.into().trim_end_matches('/').to_string();
        let base_uri = config.store_url().as_ref().to_string();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Magento API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if !config.verify_ssl() {
            tracing::warn!(
                "TLS certificate verification is disabled for {}",
                config.store_url()
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!config.verify_ssl())
            .build()?;

        Ok(Self {
            client,
            base_uri,
            base_path,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_uri, self.base_path, path)
    }

    /// Sends an HTTP request and decodes the JSON response.
    ///
    /// Requests are sent once; there is no automatic retry.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - A 2xx body is not valid JSON (`Decode`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
            HttpMethod::Patch => self.client.patch(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(
            "{} {} (query params: {})",
            request.http_method.to_string().to_uppercase(),
            url,
            request.query.as_ref().map_or(0, HashMap::len)
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        if !(200..=299).contains(&code) {
            let message = Self::render_error(code, &body_text);
            tracing::debug!(
                "{} {} failed with HTTP {}: {}",
                request.http_method,
                request.path,
                code,
                message
            );
            return Err(HttpError::Response(HttpResponseError { code, message }));
        }

        let body = if body_text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&body_text).map_err(|e| HttpError::Decode {
                code,
                reason: e.to_string(),
            })?
        };

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Posts a raw XML document to `path` and returns the response text.
    ///
    /// Used by the XML-RPC client, whose payloads are not JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] on connection failures and
    /// [`HttpError::Response`] on non-2xx responses.
    pub async fn post_xml(&self, path: &str, body: String) -> Result<String, HttpError> {
        let url = self.url_for(path);

        let mut req_builder = self.client.post(&url);
        for (key, value) in &self.default_headers {
            if key != "Accept" {
                req_builder = req_builder.header(key, value);
            }
        }
        req_builder = req_builder
            .header("Accept", DataType::Xml.as_content_type())
            .header("Content-Type", DataType::Xml.as_content_type())
            .body(body);

        tracing::debug!("POST {} (XML-RPC)", url);

        let res = req_builder.send().await?;
        let code = res.status().as_u16();
        let text = res.text().await?;

        if !(200..=299).contains(&code) {
            return Err(HttpError::Response(HttpResponseError {
                code,
                message: Self::fallback_message(code, &text),
            }));
        }

        Ok(text)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Builds a readable message from a Magento error body.
    ///
    /// Magento answers errors with `{"message": ..., "parameters": ...}` and
    /// optionally an `errors` array of the same shape.
    fn render_error(code: u16, body_text: &str) -> String {
        let Ok(body) = serde_json::from_str::<serde_json::Value>(body_text) else {
            return Self::fallback_message(code, body_text);
        };

        let Some(message) = render_message(&body) else {
            return Self::fallback_message(code, body_text);
        };

        let details: Vec<String> = body
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .map(|errors| errors.iter().filter_map(render_message).collect())
            .unwrap_or_default();

        if details.is_empty() {
            message
        } else {
            format!("{message} ({})", details.join("; "))
        }
    }

    fn fallback_message(code: u16, body_text: &str) -> String {
        let text = body_text.trim();
        if text.is_empty() {
            reqwest::StatusCode::from_u16(code)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            text.to_string()
        }
    }
}

/// Renders one `{"message", "parameters"}` object, filling placeholders.
///
/// Array parameters fill `%1`, `%2`, ...; object parameters fill `%name`.
fn render_message(value: &serde_json::Value) -> Option<String> {
    let mut message = value.get("message")?.as_str()?.to_string();

    match value.get("parameters") {
        Some(serde_json::Value::Array(params)) => {
            // Highest index first so %1 does not clobber %10.
            for (index, param) in params.iter().enumerate().rev() {
                message = message.replace(&format!("%{}", index + 1), &plain_text(param));
            }
        }
        Some(serde_json::Value::Object(params)) => {
            let mut keys: Vec<&String> = params.keys().collect();
            keys.sort_by_key(|key| std::cmp::Reverse(key.len()));
            for key in keys {
                message = message.replace(&format!("%{key}"), &plain_text(&params[key]));
            }
        }
        _ => {}
    }

    Some(message)
}

fn plain_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
