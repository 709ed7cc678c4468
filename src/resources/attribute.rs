//! Product attributes, attribute groups and attribute sets.

use serde_json::{json, Map, Value};

use super::search::SearchCriteria;
use super::{id_from, segment, truthy, wrap_with, ResourceError};
use crate::clients::RestClient;

/// Replaces a `null` extension payload with an empty object.
fn extension_attributes(extension: Value) -> Value {
    if extension.is_null() {
        Value::Object(Map::new())
    } else {
        extension
    }
}

/// Product attribute endpoints, addressed by attribute code.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// let attributes = magento.product_attributes();
/// attributes.create("material", "Material", "select", json!({"is_required": false})).await?;
/// attributes.add_option("material", "Cotton", "cotton", json!(null)).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ProductAttributes<'a> {
    rest: &'a RestClient,
}

impl<'a> ProductAttributes<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Lists the attributes of an attribute set.
    /// GET `products/attribute-sets/{set_id}/attributes`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self, set_id: u64) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(&format!("products/attribute-sets/{set_id}/attributes"), None)
            .await?)
    }

    /// Retrieves an attribute. GET `products/attributes/{code}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn info(&self, code: &str) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(&format!("products/attributes/{}", segment(code)), None)
            .await?)
    }

    /// Lists an attribute's options. GET `products/attributes/{code}/options`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn options(&self, code: &str) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(&format!("products/attributes/{}/options", segment(code)), None)
            .await?)
    }

    /// Adds an option to an attribute. POST `products/attributes/{code}/options`.
    ///
    /// Returns the server's answer, usually the new option id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `data` is not an object,
    /// and [`ResourceError::Rest`] if the request fails.
    pub async fn add_option(
        &self,
        code: &str,
        label: &str,
        value: &str,
        data: Value,
    ) -> Result<Value, ResourceError> {
        let mut base = Map::new();
        base.insert("label".to_string(), json!(label));
        base.insert("value".to_string(), json!(value));

        let body = wrap_with("option", base, data)?;
        let response = self
            .rest
            .post(&format!("products/attributes/{}/options", segment(code)), body, None)
            .await?;
        Ok(response.body)
    }

    /// Removes an option from an attribute.
    /// DELETE `products/attributes/{code}/options/{option_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn remove_option(&self, code: &str, option_id: &str) -> Result<bool, ResourceError> {
        let response = self
            .rest
            .delete(
                &format!(
                    "products/attributes/{}/options/{}",
                    segment(code),
                    segment(option_id)
                ),
                None,
            )
            .await?;
        Ok(truthy(&response.body))
    }

    /// Creates an attribute and returns its id. POST `products/attributes`.
    ///
    /// `frontend_input` is one of the codes returned by [`types`](Self::types).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `data` is not an object,
    /// [`ResourceError::UnexpectedResponse`] if the response carries no id,
    /// and [`ResourceError::Rest`] if the request fails.
    pub async fn create(
        &self,
        code: &str,
        label: &str,
        frontend_input: &str,
        data: Value,
    ) -> Result<i64, ResourceError> {
        let mut base = Map::new();
        base.insert("attribute_code".to_string(), json!(code));
        base.insert("default_frontend_label".to_string(), json!(label));
        base.insert("frontend_input".to_string(), json!(frontend_input));

        let body = wrap_with("attribute", base, data)?;
        let response = self.rest.post("products/attributes", body, None).await?;
        id_from("product_attributes.create", &response.body, &["attribute_id", "id"])
    }

    /// Updates an attribute and returns the saved attribute.
    /// PUT `products/attributes/{code}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `data` is not an object,
    /// and [`ResourceError::Rest`] if the request fails.
    pub async fn update(&self, code: &str, data: Value) -> Result<Value, ResourceError> {
        let body = wrap_with("attribute", Map::new(), data)?;
        let response = self
            .rest
            .put(&format!("products/attributes/{}", segment(code)), body, None)
            .await?;
        Ok(response.body)
    }

    /// Lists the frontend input types. GET `products/attributes/types`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn types(&self) -> Result<Value, ResourceError> {
        Ok(self.rest.get_json("products/attributes/types", None).await?)
    }
}

/// Attribute group endpoints.
#[derive(Clone, Copy, Debug)]
pub struct ProductAttributeGroups<'a> {
    rest: &'a RestClient,
}

impl<'a> ProductAttributeGroups<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Searches attribute groups. GET `products/attribute-sets/groups/list`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self, criteria: &SearchCriteria) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(
                "products/attribute-sets/groups/list",
                Some(criteria.to_query()),
            )
            .await?)
    }

    /// Creates a group in an attribute set and returns its id.
    /// POST `products/attribute-sets/groups`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the response carries
    /// no id, and [`ResourceError::Rest`] if the request fails.
    pub async fn create(
        &self,
        name: &str,
        set_id: u64,
        extension: Value,
    ) -> Result<i64, ResourceError> {
        let body = json!({
            "group": {
                "attribute_group_name": name,
                "attribute_set_id": set_id,
                "extension_attributes": extension_attributes(extension),
            }
        });
        let response = self
            .rest
            .post("products/attribute-sets/groups", body, None)
            .await?;
        id_from(
            "product_attribute_groups.create",
            &response.body,
            &["attribute_group_id", "id"],
        )
    }

    /// Removes a group. DELETE `products/attribute-sets/groups/{group_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn remove(&self, group_id: u64) -> Result<bool, ResourceError> {
        let response = self
            .rest
            .delete(&format!("products/attribute-sets/groups/{group_id}"), None)
            .await?;
        Ok(truthy(&response.body))
    }
}

/// Attribute set endpoints.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::Value;
///
/// let sets = magento.product_attribute_sets();
/// let set_id = sets.create("Bags", 4, Value::Null).await?;
/// sets.attribute_add(set_id as u64, 7, "material", 10).await?;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ProductAttributeSets<'a> {
    rest: &'a RestClient,
}

impl<'a> ProductAttributeSets<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Searches attribute sets. GET `products/attribute-sets/sets/list`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self, criteria: &SearchCriteria) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json("products/attribute-sets/sets/list", Some(criteria.to_query()))
            .await?)
    }

    /// Creates an attribute set from a skeleton set and returns its id.
    /// POST `products/attribute-sets`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the response carries
    /// no id, and [`ResourceError::Rest`] if the request fails.
    pub async fn create(
        &self,
        name: &str,
        skeleton_id: u64,
        extension: Value,
    ) -> Result<i64, ResourceError> {
        let body = json!({
            "attributeSet": {
                "attribute_set_name": name,
                "sort_order": 0,
                "entity_type_id": 0,
                "extension_attributes": extension_attributes(extension),
            },
            "skeletonId": skeleton_id,
        });
        let response = self.rest.post("products/attribute-sets", body, None).await?;
        id_from(
            "product_attribute_sets.create",
            &response.body,
            &["attribute_set_id", "id"],
        )
    }

    /// Adds an existing attribute to a set and group, returning the entity
    /// attribute id. POST `products/attribute-sets/attributes`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the response is not
    /// an id, and [`ResourceError::Rest`] if the request fails.
    pub async fn attribute_add(
        &self,
        set_id: u64,
        group_id: u64,
        code: &str,
        sort_order: i64,
    ) -> Result<i64, ResourceError> {
        let body = json!({
            "attributeSetId": set_id,
            "attributeGroupId": group_id,
            "attributeCode": code,
            "sortOrder": sort_order,
        });
        let response = self
            .rest
            .post("products/attribute-sets/attributes", body, None)
            .await?;
        id_from("product_attribute_sets.attribute_add", &response.body, &[])
    }

    /// Removes an attribute from a set.
    /// DELETE `products/attribute-sets/{set_id}/attributes/{code}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn attribute_remove(&self, code: &str, set_id: u64) -> Result<bool, ResourceError> {
        let response = self
            .rest
            .delete(
                &format!("products/attribute-sets/{set_id}/attributes/{}", segment(code)),
                None,
            )
            .await?;
        Ok(truthy(&response.body))
    }
}
