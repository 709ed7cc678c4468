//! Product links and configurable product links.
//!
//! [`ProductLinks`] covers related, up-sell, cross-sell and grouped links
//! through `catalog_product_link.*`. [`ProductConfigurables`] uses the
//! `ol_catalog_product_link.*` methods, which exist only when the store has
//! the matching web services extension installed.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::{rpc_call, truthy, ProductIdentifier, ResourceError};
use crate::clients::{RpcClient, RpcValue};

/// Kind of product link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkType {
    /// Shown in the cart.
    CrossSell,
    /// Shown on the product page as a better alternative.
    UpSell,
    /// Shown on the product page as related.
    Related,
    /// Member of a grouped product.
    Grouped,
}

impl LinkType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CrossSell => "cross_sell",
            Self::UpSell => "up_sell",
            Self::Related => "related",
            Self::Grouped => "grouped",
        }
    }

    fn to_rpc(self) -> RpcValue {
        RpcValue::from(self.as_str())
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cross_sell" => Ok(Self::CrossSell),
            "up_sell" => Ok(Self::UpSell),
            "related" => Ok(Self::Related),
            "grouped" => Ok(Self::Grouped),
            other => Err(ResourceError::InvalidArgument {
                reason: format!("unknown link type '{other}'"),
            }),
        }
    }
}

/// Product link endpoints.
///
/// The `identifierType` sent with each call is taken from `product`; the
/// linked product must be referenced the same way.
///
/// # Example
///
/// ```rust,ignore
/// use magento_api::resources::{LinkType, ProductIdentifier};
/// use serde_json::json;
///
/// let bag = ProductIdentifier::from("24-MB01");
/// let strap = ProductIdentifier::from("24-UG04");
/// magento.product_links()
///     .assign(LinkType::Related, &bag, &strap, json!({"position": 1}))
///     .await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ProductLinks<'a> {
    rpc: Option<&'a RpcClient>,
}

impl<'a> ProductLinks<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rpc: Option<&'a RpcClient>) -> Self {
        Self { rpc }
    }

    /// Lists the products linked to `product`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn list(
        &self,
        link_type: LinkType,
        product: &ProductIdentifier,
    ) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_product_link.list",
            vec![
                link_type.to_rpc(),
                product.to_rpc(),
                product.identifier_type_rpc(),
            ],
        )
        .await
    }

    /// Links `linked` to `product`. `data` holds link attributes such as
    /// `position` or `qty`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn assign(
        &self,
        link_type: LinkType,
        product: &ProductIdentifier,
        linked: &ProductIdentifier,
        data: Value,
    ) -> Result<bool, ResourceError> {
        self.write("catalog_product_link.assign", link_type, product, linked, data)
            .await
    }

    /// Updates the attributes of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn update(
        &self,
        link_type: LinkType,
        product: &ProductIdentifier,
        linked: &ProductIdentifier,
        data: Value,
    ) -> Result<bool, ResourceError> {
        self.write("catalog_product_link.update", link_type, product, linked, data)
            .await
    }

    /// Removes a link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn remove(
        &self,
        link_type: LinkType,
        product: &ProductIdentifier,
        linked: &ProductIdentifier,
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "catalog_product_link.remove",
            vec![
                link_type.to_rpc(),
                product.to_rpc(),
                linked.to_rpc(),
                product.identifier_type_rpc(),
            ],
        )
        .await?;
        Ok(truthy(&result))
    }

    /// Lists the link types the store supports.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn types(&self) -> Result<Value, ResourceError> {
        rpc_call(self.rpc, "catalog_product_link.types", Vec::new()).await
    }

    /// Lists the attributes of a link type, e.g. `[{"code": "position", "type": "int"}]`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn attributes(&self, link_type: LinkType) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_product_link.attributes",
            vec![link_type.to_rpc()],
        )
        .await
    }

    async fn write(
        &self,
        method: &'static str,
        link_type: LinkType,
        product: &ProductIdentifier,
        linked: &ProductIdentifier,
        data: Value,
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            method,
            vec![
                link_type.to_rpc(),
                product.to_rpc(),
                linked.to_rpc(),
                RpcValue::from(data),
                product.identifier_type_rpc(),
            ],
        )
        .await?;
        Ok(truthy(&result))
    }
}

/// Configurable product endpoints.
#[derive(Clone, Copy, Debug)]
pub struct ProductConfigurables<'a> {
    rpc: Option<&'a RpcClient>,
}

impl<'a> ProductConfigurables<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rpc: Option<&'a RpcClient>) -> Self {
        Self { rpc }
    }

    /// Lists the child products of a configurable product.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn info(&self, product: &ProductIdentifier) -> Result<Value, ResourceError> {
        rpc_call(self.rpc, "ol_catalog_product_link.list", vec![product.to_rpc()]).await
    }

    /// Lists the configurable (super) attributes of a product.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn super_attributes(
        &self,
        product: &ProductIdentifier,
    ) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "ol_catalog_product_link.listSuperAttributes",
            vec![product.to_rpc()],
        )
        .await
    }

    /// Sets the values of a super attribute.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn set_super_attribute_values(
        &self,
        product: &ProductIdentifier,
        attribute_id: u64,
    ) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "ol_catalog_product_link.setSuperAttributeValues",
            vec![product.to_rpc(), RpcValue::from(attribute_id)],
        )
        .await
    }

    /// Links child products to a configurable product.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn update(
        &self,
        product: &ProductIdentifier,
        linked: &[ProductIdentifier],
        attributes: Value,
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "ol_catalog_product_link.assign",
            vec![product.to_rpc(), identifiers(linked), RpcValue::from(attributes)],
        )
        .await?;
        Ok(truthy(&result))
    }

    /// Unlinks child products from a configurable product.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn remove(
        &self,
        product: &ProductIdentifier,
        linked: &[ProductIdentifier],
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "ol_catalog_product_link.remove",
            vec![product.to_rpc(), identifiers(linked)],
        )
        .await?;
        Ok(truthy(&result))
    }
}

fn identifiers(products: &[ProductIdentifier]) -> RpcValue {
    RpcValue::Array(products.iter().map(ProductIdentifier::to_rpc).collect())
}
