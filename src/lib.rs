//! # Magento API Rust Client
//!
//! A thin async client for the Magento 2 REST API and the legacy Magento
//! XML-RPC API, providing type-safe configuration, token authentication and
//! endpoint catalogs for the common admin resources.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`MagentoConfig`] and [`MagentoConfigBuilder`]
//! - Validated newtypes for store URLs, store codes and credentials
//! - Admin and customer token exchange via [`auth`]
//! - A bearer-token REST transport, [`clients::RestClient`]
//! - A session-based XML-RPC transport with `multiCall` batching,
//!   [`clients::RpcClient`]
//! - Endpoint handles for customers, categories, products, attributes,
//!   media, links, inventory and directory data via [`resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use magento_api::{Credentials, MagentoConfig, StoreUrl};
//!
//! // Create configuration using the builder pattern
//! let config = MagentoConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .credentials(Credentials::new("admin", "secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.rest_base_path(), "/rest/V1");
//! ```
//!
//! ## Connecting
//!
//! [`Magento::connect`] exchanges the configured credentials for an admin
//! token and, when an RPC endpoint is configured, opens an RPC session:
//!
//! ```rust,ignore
//! use magento_api::{Credentials, Magento, MagentoConfig, StoreUrl};
//! use magento_api::resources::{Condition, SearchCriteria};
//!
//! let config = MagentoConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com")?)
//!     .credentials(Credentials::new("apiuser", "apikey")?)
//!     .rpc_endpoint("index.php/api/xmlrpc/")
//!     .build()?;
//!
//! let mut magento = Magento::connect(&config).await?;
//!
//! let criteria = SearchCriteria::new().filter("email", Condition::Eq, "jane@example.com");
//! let customers = magento.customers().list(&criteria).await?;
//!
//! magento.disconnect().await?;
//! ```
//!
//! ## Using the Transports Directly
//!
//! ```rust,ignore
//! use magento_api::clients::{RestClient, RpcValue};
//!
//! let rest = RestClient::new(&config, Some(token))?;
//! let product = rest.get_json("products/24-MB01", None).await?;
//!
//! let result = rpc.call("catalog_category.currentStore", vec![RpcValue::from("default")]).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Thin**: Payloads and results stay in Magento's own JSON shapes

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
mod magento;
pub mod resources;

pub use magento::Magento;

// Re-export public types at crate root for convenience
pub use auth::{AccessToken, AuthError, TokenKind};
pub use config::{
    ApiPassword, ApiUsername, Credentials, MagentoConfig, MagentoConfigBuilder, StoreCode,
    StoreUrl,
};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, RestClient, RestError, RpcClient, RpcError,
    RpcFault, RpcValue,
};
pub use resources::ResourceError;
