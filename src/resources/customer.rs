//! Customers, customer groups and customer addresses.

use std::collections::HashMap;

use serde_json::{json, Value};

use super::search::SearchCriteria;
use super::{id_from, rpc_call, truthy, ResourceError};
use crate::clients::{RestClient, RpcClient, RpcValue};

/// Customer endpoints.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// let id = magento.customers().create(json!({
///     "email": "jdoe@example.com",
///     "firstname": "Jane",
///     "lastname": "Doe",
/// })).await?;
///
/// let customer = magento.customers().info(id, Some(&["email", "group_id"])).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Customers<'a> {
    rest: &'a RestClient,
}

impl<'a> Customers<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Searches customers. GET `customers/search`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self, criteria: &SearchCriteria) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json("customers/search", Some(criteria.to_query()))
            .await?)
    }

    /// Creates a customer and returns its id. POST `customers`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the response carries
    /// no id, and [`ResourceError::Rest`] if the request fails.
    pub async fn create(&self, data: Value) -> Result<i64, ResourceError> {
        let response = self
            .rest
            .post("customers", json!({ "customer": data }), None)
            .await?;
        id_from("customers.create", &response.body, &["id"])
    }

    /// Retrieves a customer. GET `customers/{id}`.
    ///
    /// When `attributes` is given, only those fields are requested.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn info(&self, id: u64, attributes: Option<&[&str]>) -> Result<Value, ResourceError> {
        let query = attributes.filter(|a| !a.is_empty()).map(|a| {
            HashMap::from([("fields".to_string(), a.join(","))])
        });
        Ok(self.rest.get_json(&format!("customers/{id}"), query).await?)
    }

    /// Updates a customer. PUT `customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn update(&self, id: u64, data: Value) -> Result<bool, ResourceError> {
        let response = self
            .rest
            .put(&format!("customers/{id}"), json!({ "customer": data }), None)
            .await?;
        Ok(truthy(&response.body))
    }

    /// Deletes a customer. DELETE `customers/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn delete(&self, id: u64) -> Result<bool, ResourceError> {
        let response = self.rest.delete(&format!("customers/{id}"), None).await?;
        Ok(truthy(&response.body))
    }
}

/// Customer group endpoints.
#[derive(Clone, Copy, Debug)]
pub struct CustomerGroups<'a> {
    rest: &'a RestClient,
}

impl<'a> CustomerGroups<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Searches customer groups. GET `customerGroups/search`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self, criteria: &SearchCriteria) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json("customerGroups/search", Some(criteria.to_query()))
            .await?)
    }
}

/// Customer address endpoints.
///
/// Reads go through REST; writes use the `customer_address.*` RPC methods.
#[derive(Clone, Copy, Debug)]
pub struct CustomerAddresses<'a> {
    rest: &'a RestClient,
    rpc: Option<&'a RpcClient>,
}

impl<'a> CustomerAddresses<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient, rpc: Option<&'a RpcClient>) -> Self {
        Self { rest, rpc }
    }

    /// Lists a customer's addresses, taken from GET `customers/{id}`.
    ///
    /// A customer without addresses yields an empty array.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self, customer_id: u64) -> Result<Value, ResourceError> {
        let customer = self
            .rest
            .get_json(&format!("customers/{customer_id}"), None)
            .await?;
        Ok(customer
            .get("addresses")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())))
    }

    /// Creates an address and returns its id. RPC `customer_address.create`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn create(&self, customer_id: u64, data: Value) -> Result<i64, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "customer_address.create",
            vec![RpcValue::from(customer_id), RpcValue::from(data)],
        )
        .await?;
        id_from("customer_address.create", &result, &["id"])
    }

    /// Retrieves an address. GET `customers/addresses/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn info(&self, id: u64) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(&format!("customers/addresses/{id}"), None)
            .await?)
    }

    /// Updates an address. RPC `customer_address.update`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn update(&self, id: u64, data: Value) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "customer_address.update",
            vec![RpcValue::from(id), RpcValue::from(data)],
        )
        .await?;
        Ok(truthy(&result))
    }

    /// Deletes an address. RPC `customer_address.delete`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn delete(&self, id: u64) -> Result<bool, ResourceError> {
        let result = rpc_call(self.rpc, "customer_address.delete", vec![RpcValue::from(id)]).await?;
        Ok(truthy(&result))
    }
}
