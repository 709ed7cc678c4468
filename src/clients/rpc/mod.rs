//! Client for Magento's legacy XML-RPC API.
//!
//! Older Magento installations (and some extensions) expose operations only
//! through `index.php/api/xmlrpc/`. The protocol has four server methods:
//! `login`, `call`, `multiCall` and `endSession`; resource operations such as
//! `catalog_category.move` are invoked through `call`.
//!
//! # Overview
//!
//! - [`RpcClient`]: Session-based XML-RPC client
//! - [`RpcValue`]: XML-RPC values, convertible to and from `serde_json::Value`
//! - [`RpcFault`]: A server fault
//! - [`RpcError`]: Error type for RPC operations
//!
//! The wire format is handled with `quick-xml`.

mod client;
mod codec;
mod errors;
mod value;

pub use client::RpcClient;
pub use codec::{decode_response, encode_call};
pub use errors::{RpcError, RpcFault};
pub use value::RpcValue;
