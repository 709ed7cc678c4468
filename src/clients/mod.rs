//! HTTP client types for Magento API communication.
//!
//! This module provides the transport layer: a plain HTTP client, the REST
//! client that attaches bearer tokens, and the legacy XML-RPC client.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE, PATCH)
//! - [`DataType`]: Content types for request bodies
//! - [`RestClient`]: Bearer-authenticated REST client
//! - [`RpcClient`]: Session-based XML-RPC client
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::{MagentoConfig, StoreUrl};
//! use magento_api::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let config = MagentoConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(config.rest_base_path(), &config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "directory/countries")
//!     .header("Authorization", "Bearer token")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Failure Behavior
//!
//! Every request is sent exactly once. Non-2xx responses fail immediately
//! with [`HttpError::Response`]; there is no retry or backoff.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;
pub mod rpc;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use rest::{RestClient, RestError};
pub use rpc::{RpcClient, RpcError, RpcFault, RpcValue};
