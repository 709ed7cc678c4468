//! Product and product type endpoints.

use serde_json::{json, Map, Value};

use super::search::SearchCriteria;
use super::{id_from, segment, truthy, wrap_with, ResourceError, ScopeRef};
use crate::clients::RestClient;

/// Product endpoints.
///
/// Products are addressed by SKU, percent-encoded into the path.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// let id = magento.products()
///     .create("simple", 4, "MH01-XS-Black", json!({"name": "Chaz Kangeroo Hoodie", "price": 52}))
///     .await?;
///
/// let product = magento.products().info("MH01-XS-Black").await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Products<'a> {
    rest: &'a RestClient,
}

impl<'a> Products<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Searches products. GET `products`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(
        &self,
        criteria: &SearchCriteria,
        store_view: Option<&ScopeRef>,
    ) -> Result<Value, ResourceError> {
        let mut query = criteria.to_query();
        if let Some(store) = store_view {
            query.insert("storeId".to_string(), store.to_string());
        }
        Ok(self.rest.get_json("products", Some(query)).await?)
    }

    /// Retrieves a product. GET `products/{sku}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn info(&self, sku: &str) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(&format!("products/{}", segment(sku)), None)
            .await?)
    }

    /// Creates a product and returns its id. POST `products`.
    ///
    /// `data` is merged over the type, attribute set and SKU.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `data` is not an object,
    /// [`ResourceError::UnexpectedResponse`] if the response carries no id,
    /// and [`ResourceError::Rest`] if the request fails.
    pub async fn create(
        &self,
        type_id: &str,
        attribute_set_id: u64,
        sku: &str,
        data: Value,
    ) -> Result<i64, ResourceError> {
        let mut base = Map::new();
        base.insert("type_id".to_string(), json!(type_id));
        base.insert("attribute_set_id".to_string(), json!(attribute_set_id));
        base.insert("sku".to_string(), json!(sku));

        let body = wrap_with("product", base, data)?;
        let response = self.rest.post("products", body, None).await?;
        id_from("products.create", &response.body, &["id"])
    }

    /// Updates a product and returns the saved product. PUT `products/{sku}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `data` is not an object,
    /// and [`ResourceError::Rest`] if the request fails.
    pub async fn update(&self, sku: &str, data: Value) -> Result<Value, ResourceError> {
        let body = wrap_with("product", Map::new(), data)?;
        let response = self
            .rest
            .put(&format!("products/{}", segment(sku)), body, None)
            .await?;
        Ok(response.body)
    }

    /// Deletes a product. DELETE `products/{sku}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn remove(&self, sku: &str) -> Result<bool, ResourceError> {
        let response = self
            .rest
            .delete(&format!("products/{}", segment(sku)), None)
            .await?;
        Ok(truthy(&response.body))
    }
}

/// Product type endpoints.
#[derive(Clone, Copy, Debug)]
pub struct ProductTypes<'a> {
    rest: &'a RestClient,
}

impl<'a> ProductTypes<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Lists product types. GET `products/types`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self) -> Result<Value, ResourceError> {
        Ok(self.rest.get_json("products/types", None).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::test_support::rest_client;
    use crate::resources::Condition;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_with_store_view() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/V1/products"))
            .and(query_param("storeId", "2"))
            .and(query_param(
                "searchCriteria[filter_groups][0][filters][0][field]",
                "sku",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let rest = rest_client(&server);
        let criteria = SearchCriteria::new().filter("sku", Condition::Like, "MH%");
        Products::new(&rest)
            .list(&criteria, Some(&ScopeRef::from(2_u64)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_info_encodes_sku() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/V1/products/MH01%20XS%2FBlack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sku": "MH01 XS/Black"})))
            .expect(1)
            .mount(&server)
            .await;

        let rest = rest_client(&server);
        let product = Products::new(&rest).info("MH01 XS/Black").await.unwrap();
        assert_eq!(product["sku"], "MH01 XS/Black");
    }

    #[tokio::test]
    async fn test_create_merges_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/V1/products"))
            .and(body_json(json!({
                "product": {
                    "type_id": "simple",
                    "attribute_set_id": 4,
                    "sku": "24-MB01",
                    "name": "Joust Duffle Bag",
                    "price": 34
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "sku": "24-MB01"})))
            .expect(1)
            .mount(&server)
            .await;

        let rest = rest_client(&server);
        let id = Products::new(&rest)
            .create("simple", 4, "24-MB01", json!({"name": "Joust Duffle Bag", "price": 34}))
            .await
            .unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_non_object_data_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let rest = rest_client(&server);
        let result = Products::new(&rest)
            .create("simple", 4, "24-MB01", json!("oops"))
            .await;
        assert!(matches!(result, Err(ResourceError::InvalidArgument { .. })));
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/rest/V1/products/24-MB01"))
            .and(body_json(json!({"product": {"price": 30}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sku": "24-MB01", "price": 30})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/rest/V1/products/24-MB01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
            .expect(1)
            .mount(&server)
            .await;

        let rest = rest_client(&server);
        let products = Products::new(&rest);

        let updated = products.update("24-MB01", json!({"price": 30})).await.unwrap();
        assert_eq!(updated["price"], 30);
        assert!(products.remove("24-MB01").await.unwrap());
    }

    #[tokio::test]
    async fn test_product_types() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/V1/products/types"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"name": "simple", "label": "Simple Product"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let rest = rest_client(&server);
        let types = ProductTypes::new(&rest).list().await.unwrap();
        assert_eq!(types[0]["name"], "simple");
    }
}
