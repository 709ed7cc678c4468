//! REST API client for the Magento REST API.
//!
//! This module provides a higher-level client built on top of the
//! [`HttpClient`](crate::clients::HttpClient) that attaches the bearer token
//! and offers one method per HTTP verb.
//!
//! # Overview
//!
//! - [`RestClient`]: The REST API client with `get()`, `post()`, `put()`, `delete()`, `patch()` methods
//! - [`RestError`]: Error type for REST API operations
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::{MagentoConfig, StoreUrl, Credentials};
//! use magento_api::clients::RestClient;
//!
//! let config = MagentoConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut client = RestClient::new(&config, None)?;
//! client.login(&Credentials::new("admin", "secret").unwrap()).await?;
//!
//! let response = client.get("store/storeViews", None).await?;
//! println!("Store views: {}", response.body);
//! ```
//!
//! # Parameters
//!
//! GET and DELETE send their parameters as the query string; POST, PUT and
//! PATCH send a JSON body. Paths are relative to `/rest[/{store_code}]/V1`,
//! and a leading `/` is ignored.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
