//! Endpoint catalogs for Magento resources.
//!
//! Each type in this module is a thin, borrowed handle over the transports:
//! a method builds a resource path (or picks an RPC method name), shapes the
//! payload, forwards the call, and optionally coerces the result to an `i64`
//! id or a `bool`. Payloads and results are `serde_json::Value`s in Magento's
//! own shapes.
//!
//! # Overview
//!
//! - [`Customers`], [`CustomerGroups`], [`CustomerAddresses`]
//! - [`Categories`], [`CategoryAttributes`]
//! - [`Products`], [`ProductTypes`]
//! - [`ProductAttributes`], [`ProductAttributeGroups`], [`ProductAttributeSets`]
//! - [`ProductImages`], [`ProductTierPrices`]
//! - [`ProductLinks`], [`ProductConfigurables`]
//! - [`Inventory`], [`Countries`]
//! - [`SearchCriteria`]: Magento's bracketed query-string filter language
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::resources::{Condition, SearchCriteria};
//!
//! let criteria = SearchCriteria::new().filter("email", Condition::Like, "%@example.com");
//! let customers = magento.customers().list(&criteria).await?;
//!
//! let moved = magento.categories().move_to(12, 3, None).await?;
//! ```
//!
//! # RPC-backed Methods
//!
//! Some operations exist only in the legacy XML-RPC API. They return
//! [`ResourceError::RpcUnavailable`] when the handle was created without an
//! RPC client.

mod attribute;
mod category;
mod customer;
mod directory;
mod errors;
mod inventory;
mod link;
mod media;
mod product;
mod search;
#[cfg(test)]
mod test_support;
mod tier_price;

pub use attribute::{ProductAttributeGroups, ProductAttributeSets, ProductAttributes};
pub use category::{Categories, CategoryAttributes};
pub use customer::{CustomerAddresses, CustomerGroups, Customers};
pub use directory::Countries;
pub use errors::ResourceError;
pub use inventory::Inventory;
pub use link::{LinkType, ProductConfigurables, ProductLinks};
pub use media::{ImageFile, ProductImages};
pub use product::{ProductTypes, Products};
pub use search::{Condition, Filter, SearchCriteria, SortDirection};
pub use tier_price::ProductTierPrices;

use std::fmt;

use serde_json::Value;

use crate::clients::{RpcClient, RpcValue};

/// A product referenced by numeric id or by SKU.
///
/// RPC methods pass the matching `identifierType` (`"id"` or `"sku"`) so
/// numeric SKUs are not mistaken for ids.
///
/// # Example
///
/// ```rust
/// use magento_api::resources::ProductIdentifier;
///
/// assert_eq!(ProductIdentifier::from(42_u64).identifier_type(), "id");
/// assert_eq!(ProductIdentifier::from("24-MB01").identifier_type(), "sku");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProductIdentifier {
    /// The product entity id.
    Id(u64),
    /// The product SKU.
    Sku(String),
}

impl ProductIdentifier {
    /// Returns the RPC `identifierType` for this reference.
    #[must_use]
    pub const fn identifier_type(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Sku(_) => "sku",
        }
    }

    pub(crate) fn to_rpc(&self) -> RpcValue {
        match self {
            Self::Id(id) => RpcValue::from(*id),
            Self::Sku(sku) => RpcValue::from(sku.as_str()),
        }
    }

    pub(crate) fn identifier_type_rpc(&self) -> RpcValue {
        RpcValue::from(self.identifier_type())
    }
}

impl fmt::Display for ProductIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Sku(sku) => f.write_str(sku),
        }
    }
}

impl From<u64> for ProductIdentifier {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ProductIdentifier {
    fn from(sku: &str) -> Self {
        Self::Sku(sku.to_string())
    }
}

impl From<String> for ProductIdentifier {
    fn from(sku: String) -> Self {
        Self::Sku(sku)
    }
}

/// A store view or website referenced by id or code.
///
/// # Example
///
/// ```rust
/// use magento_api::resources::ScopeRef;
///
/// assert_eq!(ScopeRef::from(1_u64).to_string(), "1");
/// assert_eq!(ScopeRef::from("default").to_string(), "default");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeRef {
    /// Numeric store or website id.
    Id(u64),
    /// Store view or website code.
    Code(String),
}

impl ScopeRef {
    pub(crate) fn to_rpc(&self) -> RpcValue {
        match self {
            Self::Id(id) => RpcValue::from(*id),
            Self::Code(code) => RpcValue::from(code.as_str()),
        }
    }
}

impl fmt::Display for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

impl From<u64> for ScopeRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ScopeRef {
    fn from(code: &str) -> Self {
        Self::Code(code.to_string())
    }
}

impl From<String> for ScopeRef {
    fn from(code: String) -> Self {
        Self::Code(code)
    }
}

/// Maps an optional scope to an RPC argument, `nil` when absent.
pub(crate) fn scope_arg(scope: Option<&ScopeRef>) -> RpcValue {
    scope.map_or(RpcValue::Nil, ScopeRef::to_rpc)
}

/// Percent-encodes one path segment (an id, SKU or attribute code).
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Calls an RPC resource method and converts the result to JSON.
pub(crate) async fn rpc_call(
    rpc: Option<&RpcClient>,
    method: &'static str,
    args: Vec<RpcValue>,
) -> Result<Value, ResourceError> {
    let rpc = rpc.ok_or(ResourceError::RpcUnavailable { method })?;
    Ok(rpc.call(method, args).await?.to_json())
}

/// Returns the truthiness of a JSON value.
///
/// `null`, `false`, zero, `""`, `[]` and `{}` are false.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(members) => !members.is_empty(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    (f.fract() == 0.0).then_some(f as i64)
}

/// Coerces a scalar JSON value to an integer.
fn scalar_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerces a create/update result to an integer id.
///
/// Accepts a bare number, a numeric string, or an object carrying one of
/// `id_keys`.
pub(crate) fn id_from(
    operation: &'static str,
    value: &Value,
    id_keys: &[&str],
) -> Result<i64, ResourceError> {
    scalar_i64(value)
        .or_else(|| {
            id_keys
                .iter()
                .find_map(|key| value.get(*key).and_then(scalar_i64))
        })
        .ok_or_else(|| ResourceError::UnexpectedResponse {
            operation,
            expected: "an integer id",
            body: value.to_string(),
        })
}

/// Builds `{key: base + data}` where `data` must be an object or `null`.
pub(crate) fn wrap_with(
    key: &str,
    mut base: serde_json::Map<String, Value>,
    data: Value,
) -> Result<Value, ResourceError> {
    match data {
        Value::Object(extra) => base.extend(extra),
        Value::Null => {}
        other => {
            return Err(ResourceError::InvalidArgument {
                reason: format!("{key} data must be a JSON object, got {other}"),
            })
        }
    }

    let mut wrapped = serde_json::Map::new();
    wrapped.insert(key.to_string(), Value::Object(base));
    Ok(Value::Object(wrapped))
}
