//! Product images, over the `catalog_product_attribute_media.*` RPC methods.
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::resources::{ImageFile, ProductIdentifier};
//! use serde_json::json;
//!
//! let file = ImageFile::new(std::fs::read("bag.jpg")?, "image/jpeg").with_name("bag");
//! let name = magento.product_images().create(
//!     &ProductIdentifier::from("24-MB01"),
//!     json!({"file": file, "label": "Front", "types": ["image", "thumbnail"]}),
//!     None,
//! ).await?;
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::{id_from, rpc_call, scope_arg, truthy, ProductIdentifier, ResourceError, ScopeRef};
use crate::clients::{RpcClient, RpcValue};

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// Image bytes in the `{content, mime, name}` shape the media API expects.
///
/// Serializes with `content` base64-encoded.
///
/// # Example
///
/// ```rust
/// use magento_api::resources::ImageFile;
/// use serde_json::json;
///
/// let file = ImageFile::new(b"png".to_vec(), "image/png").with_name("swatch");
/// assert_eq!(
///     serde_json::to_value(&file).unwrap(),
///     json!({"content": "cG5n", "mime": "image/png", "name": "swatch"})
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageFile {
    /// Raw image bytes.
    #[serde(serialize_with = "serialize_base64")]
    pub content: Vec<u8>,
    /// MIME type, e.g. `image/jpeg`.
    pub mime: String,
    /// File name without extension; the server picks one when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ImageFile {
    /// Creates an unnamed image file.
    #[must_use]
    pub fn new(content: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            content,
            mime: mime.into(),
            name: None,
        }
    }

    /// Sets the file name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Product image endpoints.
#[derive(Clone, Copy, Debug)]
pub struct ProductImages<'a> {
    rpc: Option<&'a RpcClient>,
}

impl<'a> ProductImages<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rpc: Option<&'a RpcClient>) -> Self {
        Self { rpc }
    }

    /// Sets or reads the session store view. RPC `catalog_product_attribute_media.currentStore`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn current_store(&self, store_view: Option<&ScopeRef>) -> Result<i64, ResourceError> {
        let args = store_view.map(ScopeRef::to_rpc).into_iter().collect();
        let result =
            rpc_call(self.rpc, "catalog_product_attribute_media.currentStore", args).await?;
        id_from("catalog_product_attribute_media.currentStore", &result, &[])
    }

    /// Lists a product's images.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn list(
        &self,
        product: &ProductIdentifier,
        store_view: Option<&ScopeRef>,
    ) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_product_attribute_media.list",
            vec![
                product.to_rpc(),
                scope_arg(store_view),
                product.identifier_type_rpc(),
            ],
        )
        .await
    }

    /// Retrieves one image by file name (e.g. `/m/b/mb01-blue-0.jpg`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn info(
        &self,
        product: &ProductIdentifier,
        file: &str,
        store_view: Option<&ScopeRef>,
    ) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_product_attribute_media.info",
            vec![
                product.to_rpc(),
                RpcValue::from(file),
                scope_arg(store_view),
                product.identifier_type_rpc(),
            ],
        )
        .await
    }

    /// Lists the image types (`image`, `small_image`, `thumbnail`, ...) of an
    /// attribute set.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn types(&self, attribute_set_id: u64) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_product_attribute_media.types",
            vec![RpcValue::from(attribute_set_id)],
        )
        .await
    }

    /// Uploads an image and returns the stored file name.
    ///
    /// `data` carries `file` (see [`ImageFile`]), `label`, `position`,
    /// `exclude` and `types`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the result is not a
    /// string, and [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn create(
        &self,
        product: &ProductIdentifier,
        data: Value,
        store_view: Option<&ScopeRef>,
    ) -> Result<String, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "catalog_product_attribute_media.create",
            vec![
                product.to_rpc(),
                RpcValue::from(data),
                scope_arg(store_view),
                product.identifier_type_rpc(),
            ],
        )
        .await?;
        file_name("catalog_product_attribute_media.create", result)
    }

    /// Updates an image's label, position, exclusion or types.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn update(
        &self,
        product: &ProductIdentifier,
        file: &str,
        data: Value,
        store_view: Option<&ScopeRef>,
    ) -> Result<Value, ResourceError> {
        rpc_call(
            self.rpc,
            "catalog_product_attribute_media.update",
            vec![
                product.to_rpc(),
                RpcValue::from(file),
                RpcValue::from(data),
                scope_arg(store_view),
                product.identifier_type_rpc(),
            ],
        )
        .await
    }

    /// Removes an image.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RpcUnavailable`] without an RPC client.
    pub async fn remove(
        &self,
        product: &ProductIdentifier,
        file: &str,
    ) -> Result<bool, ResourceError> {
        let result = rpc_call(
            self.rpc,
            "catalog_product_attribute_media.remove",
            vec![
                product.to_rpc(),
                RpcValue::from(file),
                product.identifier_type_rpc(),
            ],
        )
        .await?;
        Ok(truthy(&result))
    }
}

fn file_name(operation: &'static str, result: Value) -> Result<String, ResourceError> {
    match result {
        Value::String(name) => Ok(name),
        other => Err(ResourceError::UnexpectedResponse {
            operation,
            expected: "an image file name",
            body: other.to_string(),
        }),
    }
}
