//! Stock (inventory) endpoints.
//!
//! Reads and single-item writes go through REST. The legacy
//! `cataloginventory_stock_item.update` RPC method is kept for stores that
//! update stock by product, and batched through `multiCall` by
//! [`Inventory::update_multi`].

use serde_json::{json, Value};

use super::{id_from, rpc_call, segment, truthy, ProductIdentifier, ResourceError};
use crate::clients::{RestClient, RpcClient, RpcFault, RpcValue};

const STOCK_ITEM_UPDATE: &str = "cataloginventory_stock_item.update";

/// Inventory endpoints.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// let results = magento.inventory().update_multi(vec![
///     ("24-MB01".into(), json!({"qty": 10, "is_in_stock": 1})),
///     ("24-MB04".into(), json!({"qty": 0, "is_in_stock": 0})),
/// ]).await?;
///
/// for result in results {
///     if let Err(fault) = result {
///         eprintln!("stock update failed: {fault}");
///     }
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Inventory<'a> {
    rest: &'a RestClient,
    rpc: Option<&'a RpcClient>,
}

impl<'a> Inventory<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient, rpc: Option<&'a RpcClient>) -> Self {
        Self { rest, rpc }
    }

    /// Retrieves the stock item of each SKU, in order.
    /// GET `stockItems/{sku}` per product.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] for the first request that fails.
    pub async fn list(&self, skus: &[&str]) -> Result<Value, ResourceError> {
        let mut items = Vec::with_capacity(skus.len());
        for sku in skus {
            let item = self
                .rest
                .get_json(&format!("stockItems/{}", segment(sku)), None)
                .await?;
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    /// Updates a product's stock data, e.g. `{"qty": 99, "is_in_stock": 1}`.
    /// RPC `cataloginventory_stock_item.update`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn update(
        &self,
        product: &ProductIdentifier,
        data: Value,
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            STOCK_ITEM_UPDATE,
            vec![product.to_rpc(), RpcValue::from(data)],
        )
        .await?;
        Ok(truthy(&result))
    }

    /// Updates several products' stock in one `multiCall` request.
    ///
    /// Returns one entry per pair, in order: the call's result or the fault
    /// it raised.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client, and
    /// [`ResourceError::Rpc`] if the batch as a whole fails.
    pub async fn update_multi(
        &self,
        pairs: Vec<(ProductIdentifier, Value)>,
    ) -> Result<Vec<Result<Value, RpcFault>>, ResourceError> {
        let rpc = self.rpc.ok_or(ResourceError::RpcUnavailable {
            method: STOCK_ITEM_UPDATE,
        })?;

        let calls = pairs
            .into_iter()
            .map(|(product, data)| {
                (
                    STOCK_ITEM_UPDATE.to_string(),
                    vec![product.to_rpc(), RpcValue::from(data)],
                )
            })
            .collect();

        let results = rpc.multi_call(calls).await?;
        Ok(results
            .into_iter()
            .map(|result| result.map(|value| value.to_json()))
            .collect())
    }

    /// Updates one stock item and returns its id.
    /// PUT `products/{sku}/stockItems/{item_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the response is not
    /// an id, and [`ResourceError::Rest`] if the request fails.
    pub async fn update_item(
        &self,
        sku: &str,
        item_id: u64,
        data: Value,
    ) -> Result<i64, ResourceError> {
        let response = self
            .rest
            .put(
                &format!("products/{}/stockItems/{item_id}", segment(sku)),
                json!({ "stockItem": data }),
                None,
            )
            .await?;
        id_from("inventory.update_item", &response.body, &["item_id"])
    }
}
