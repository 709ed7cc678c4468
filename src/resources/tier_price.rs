//! Product tier prices, over the `catalog_product_attribute_tier_price.*`
//! RPC methods.

use serde_json::Value;

use super::{rpc_call, truthy, ProductIdentifier, ResourceError};
use crate::clients::{RpcClient, RpcValue};

/// Tier price endpoints.
#[derive(Clone, Copy, Debug)]
pub struct ProductTierPrices<'a> {
    rpc: Option<&'a RpcClient>,
}

impl<'a> ProductTierPrices<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rpc: Option<&'a RpcClient>) -> Self {
        Self { rpc }
    }

    /// Lists a product's tier prices.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn info(&self, product: &ProductIdentifier) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_product_attribute_tier_price.info",
            vec![product.to_rpc(), product.identifier_type_rpc()],
        )
        .await
    }

    /// Replaces all of a product's tier prices with `tiers`.
    ///
    /// Each tier is an object such as
    /// `{"website": "all", "customer_group_id": "1", "qty": "10", "price": "29.99"}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn update(
        &self,
        product: &ProductIdentifier,
        tiers: Vec<Value>,
    ) -> Result<bool, ResourceError> {
        let tiers = tiers.into_iter().map(RpcValue::from).collect::<Vec<_>>();
        let result = rpc_call(
            self.rpc,
            "catalog_product_attribute_tier_price.update",
            vec![
                product.to_rpc(),
                RpcValue::Array(tiers),
                product.identifier_type_rpc(),
            ],
        )
        .await?;
        Ok(truthy(&result))
    }
}
