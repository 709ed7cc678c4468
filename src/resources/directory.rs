//! Directory (country and region) endpoints.

use serde_json::Value;

use super::{segment, ResourceError};
use crate::clients::RestClient;

/// Country endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Countries<'a> {
    rest: &'a RestClient,
}

impl<'a> Countries<'a> {
    /// Creates the handle.
    #[must_use]
    pub const fn new(rest: &'a RestClient) -> Self {
        Self { rest }
    }

    /// Lists countries with their regions. GET `directory/countries`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn list(&self) -> Result<Value, ResourceError> {
        Ok(self.rest.get_json("directory/countries", None).await?)
    }

    /// Retrieves a country by ISO code, e.g. `US`. GET `directory/countries/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rest`] if the request fails.
    pub async fn info(&self, id: &str) -> Result<Value, ResourceError> {
        Ok(self
            .rest
            .get_json(&format!("directory/countries/{}", segment(id)), None)
            .await?)
    }
}
