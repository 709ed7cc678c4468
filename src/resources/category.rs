//! Category and category attribute endpoints.
//!
//! Tree reads, CRUD and lookups go through REST. Moving a category and
//! managing its product assignments use the `catalog_category.*` RPC
//! methods, which have no REST counterpart in this client.

use std::collections::HashMap;

use serde_json::{json, Value};

use super::search::{Condition, SearchCriteria};
use super::{
    id_from, rpc_call, scope_arg, segment, truthy, ProductIdentifier, ResourceError, ScopeRef,
};
use crate::clients::{RestClient, RpcClient, RpcValue};

/// Root category used by [`Categories::tree`] when none is given.
pub const DEFAULT_ROOT_CATEGORY_ID: u64 = 2;

/// Level assigned by [`Categories::create`] when none is given.
pub const DEFAULT_CATEGORY_LEVEL: u32 = 4;

fn store_query(store_view: Option<&ScopeRef>) -> Option<HashMap<String, String>> {
    store_view.map(|store| HashMap::from([("storeId".to_string(), store.to_string())]))
}

/// Category endpoints.
///
/// # Example
///
/// ```rust,ignore
/// let id = magento.categories().create(2, "Bags", None).await?;
/// magento.categories().assign_product(id, &"24-MB01".into(), Some(1)).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Categories<'a> {
    rest: &'a RestClient,
    rpc: Option<&'a RpcClient>,
}

impl<'a> Categories<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient, rpc: Option<&'a RpcClient>) -> Self {
        Self { rest, rpc }
    }

    /// Sets or reads the session store view. RPC `catalog_category.currentStore`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn current_store(&self, store_view: Option<&ScopeRef>) -> Result<i64, ResourceError> {
        let args = store_view.map(ScopeRef::to_rpc).into_iter().collect();
        let result = rpc_call(self.rpc, "catalog_category.currentStore", args).await?;
        id_from("catalog_category.currentStore", &result, &["store_id"])
    }

    /// Retrieves the category tree. GET `categories`.
    ///
    /// `root_id` defaults to [`DEFAULT_ROOT_CATEGORY_ID`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn tree(
        &self,
        root_id: Option<u64>,
        depth: Option<u32>,
    ) -> Result<Value, ResourceError> {
        let mut query = HashMap::from([(
            "rootCategoryId".to_string(),
            root_id.unwrap_or(DEFAULT_ROOT_CATEGORY_ID).to_string(),
        )]);
        if let Some(depth) = depth {
            query.insert("depth".to_string(), depth.to_string());
        }
        Ok(self.rest.get_json("categories", Some(query)).await?)
    }

    /// Retrieves one level of categories. RPC `catalog_category.level`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn level(
        &self,
        website: Option<&ScopeRef>,
        store_view: Option<&ScopeRef>,
        parent_id: Option<u64>,
    ) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_category.level",
            vec![scope_arg(website), scope_arg(store_view), RpcValue::from(parent_id)],
        )
        .await
    }

    /// Looks categories up by exact name. GET `categories/list`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn info_by_name(&self, name: &str) -> Result<Value, ResourceError> {
        let criteria = SearchCriteria::new().filter("name", Condition::Eq, name);
        Ok(self
            .rest
            .get_json("categories/list", Some(criteria.to_query()))
            .await?)
    }

    /// Retrieves a category. GET `categories/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn info(
        &self,
        id: u64,
        store_view: Option<&ScopeRef>,
    ) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(&format!("categories/{id}"), store_query(store_view))
            .await?)
    }

    /// Creates an active category and returns its id. POST `categories`.
    ///
    /// `level` defaults to [`DEFAULT_CATEGORY_LEVEL`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the response carries
    /// no id, and [`ResourceError::Rest`] if the request fails.
    pub async fn create(
        &self,
        parent_id: u64,
        name: &str,
        level: Option<u32>,
    ) -> Result<i64, ResourceError> {
        let body = json!({
            "category": {
                "parent_id": parent_id,
                "level": level.unwrap_or(DEFAULT_CATEGORY_LEVEL),
                "name": name,
                "is_active": true,
            }
        });
        let response = self.rest.post("categories", body, None).await?;
        id_from("categories.create", &response.body, &["id"])
    }

    /// Updates a category. PUT `categories/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn update(
        &self,
        id: u64,
        data: Value,
        store_view: Option<&ScopeRef>,
    ) -> Result<bool, ResourceError> {
        let response = self
            .rest
            .put(
                &format!("categories/{id}"),
                json!({ "category": data }),
                store_query(store_view),
            )
            .await?;
        Ok(truthy(&response.body))
    }

    /// Moves a category under a new parent. RPC `catalog_category.move`.
    ///
    /// `after_id` places it after that sibling; `None` leaves the position
    /// to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn move_to(
        &self,
        id: u64,
        parent_id: u64,
        after_id: Option<u64>,
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "catalog_category.move",
            vec![
                RpcValue::from(id),
                RpcValue::from(parent_id),
                RpcValue::from(after_id),
            ],
        )
        .await?;
        Ok(truthy(&result))
    }

    /// Deletes a category. DELETE `categories/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn delete(&self, id: u64) -> Result<bool, ResourceError> {
        let response = self.rest.delete(&format!("categories/{id}"), None).await?;
        Ok(truthy(&response.body))
    }

    /// Lists a category's products. RPC `catalog_category.assignedProducts`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn assigned_products(
        &self,
        id: u64,
        store: &ScopeRef,
    ) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_category.assignedProducts",
            vec![RpcValue::from(id), store.to_rpc()],
        )
        .await
    }

    /// Assigns a product to a category. RPC `catalog_category.assignProduct`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn assign_product(
        &self,
        id: u64,
        product: &ProductIdentifier,
        position: Option<i64>,
    ) -> Result<bool, ResourceError> {
        self.product_call("catalog_category.assignProduct", id, product, position)
            .await
    }

    /// Changes an assigned product's position.
    /// RPC `catalog_category.updateProduct`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn update_product(
        &self,
        id: u64,
        product: &ProductIdentifier,
        position: Option<i64>,
    ) -> Result<bool, ResourceError> {
        self.product_call("catalog_category.updateProduct", id, product, position)
            .await
    }

    /// Removes a product from a category. RPC `catalog_category.removeProduct`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn remove_product(
        &self,
        id: u64,
        product: &ProductIdentifier,
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "catalog_category.removeProduct",
            vec![
                RpcValue::from(id),
                product.to_rpc(),
                product.identifier_type_rpc(),
            ],
        )
        .await?;
        Ok(truthy(&result))
    }

    async fn product_call(
        &self,
        method: &'static str,
        id: u64,
        product: &ProductIdentifier,
        position: Option<i64>,
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            method,
            vec![
                RpcValue::from(id),
                product.to_rpc(),
                RpcValue::from(position),
                product.identifier_type_rpc(),
            ],
        )
        .await?;
        Ok(truthy(&result))
    }
}

/// Category attribute endpoints.
#[derive(Clone, Copy, Debug)]
pub struct CategoryAttributes<'a> {
    rest: &'a RestClient,
    rpc: Option<&'a RpcClient>,
}

impl<'a> CategoryAttributes<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient, rpc: Option<&'a RpcClient>) -> Self {
        Self { rest, rpc }
    }

    /// Sets or reads the session store view. RPC `catalog_category_attribute.currentStore`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn current_store(&self, store_view: Option<&ScopeRef>) -> Result<i64, ResourceError> {
        let args = store_view.map(ScopeRef::to_rpc).into_iter().collect();
        let result = rpc_call(self.rpc, "catalog_category_attribute.currentStore", args).await?;
        id_from("catalog_category_attribute.currentStore", &result, &["store_id"])
    }

    /// Lists category attributes. GET `categories/attributes`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self) -> Result<Value, ResourceError> {
        let criteria = SearchCriteria::new();
        Ok(self
            .rest
            .get_json("categories/attributes", Some(criteria.to_query()))
            .await?)
    }

    /// Lists an attribute's options. GET `categories/attributes/{code}/options`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn options(&self, code: &str) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(&format!("categories/attributes/{}/options", segment(code)), None)
            .await?)
    }
}
