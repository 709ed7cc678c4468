//! Connection facade over the REST and RPC transports.
//!
//! [`Magento`] owns one [`RestClient`] and, when the store exposes the legacy
//! API, one logged-in [`RpcClient`]. Endpoint handles borrow from it, so a
//! single connection serves every resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use magento_api::{Credentials, Magento, MagentoConfig, StoreUrl};
//!
//! let config = MagentoConfig::builder()
//!     .store_url(StoreUrl::new("https://shop.example.com")?)
//!     .credentials(Credentials::new("admin", "secret")?)
//!     .rpc_endpoint("index.php/api/xmlrpc/")
//!     .build()?;
//!
//! let mut magento = Magento::connect(&config).await?;
//! let product = magento.products().info("24-MB01").await?;
//! magento.categories().move_to(41, 3, None).await?;
//! magento.disconnect().await?;
//! ```

use crate::auth::AuthError;
use crate::clients::{RestClient, RpcClient};
use crate::config::MagentoConfig;
use crate::resources::{
    Categories, CategoryAttributes, Countries, CustomerAddresses, CustomerGroups, Customers,
    Inventory, ProductAttributeGroups, ProductAttributeSets, ProductAttributes,
    ProductConfigurables, ProductImages, ProductLinks, ProductTierPrices, ProductTypes, Products,
    ResourceError,
};

/// A connection to one Magento store.
///
/// # Thread Safety
///
/// `Magento` is `Send + Sync`; endpoint handles only borrow it.
#[derive(Debug)]
pub struct Magento {
    rest: RestClient,
    rpc: Option<RpcClient>,
}

// Verify Magento is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Magento>();
};

impl Magento {
    /// Wraps existing transports.
    ///
    /// `rpc` should already be logged in; RPC-backed methods fail with
    /// [`RpcError::NotConnected`](crate::clients::RpcError::NotConnected)
    /// otherwise.
    #[must_use]
    pub const fn new(rest: RestClient, rpc: Option<RpcClient>) -> Self {
        Self { rest, rpc }
    }

    /// Builds the transports from `config` and logs in.
    ///
    /// - When credentials are configured and no access token is, they are
    ///   exchanged for an admin token.
    /// - When an RPC endpoint is configured, an RPC session is opened with
    ///   the same credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Auth`] with [`AuthError::MissingCredentials`]
    /// if an RPC endpoint is configured without credentials, and the
    /// transport error of a failed login otherwise.
    pub async fn connect(config: &MagentoConfig) -> Result<Self, ResourceError> {
        let mut rest = RestClient::new(config, None)?;
        if rest.access_token().is_none() {
            if let Some(credentials) = config.credentials() {
                rest.login(credentials).await?;
            }
        }

        let rpc = if config.rpc_endpoint().is_some() {
            let credentials = config
                .credentials()
                .ok_or(AuthError::MissingCredentials)?;
            let mut rpc = RpcClient::new(config)?;
            rpc.login(credentials).await?;
            Some(rpc)
        } else {
            None
        };

        tracing::debug!(
            "Connected to {} (rpc: {})",
            config.store_url(),
            rpc.is_some()
        );
        Ok(Self { rest, rpc })
    }

    /// Ends the RPC session, if one is open.
    ///
    /// Calling this twice is a no-op the second time.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Rpc`] if the server rejects `endSession`.
    pub async fn disconnect(&mut self) -> Result<(), ResourceError> {
        if let Some(rpc) = self.rpc.as_mut().filter(|rpc| rpc.is_connected()) {
            rpc.end_session().await?;
        }
        Ok(())
    }

    /// Returns the REST client.
    #[must_use]
    pub const fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Returns the REST client mutably, e.g. to replace the token.
    pub fn rest_mut(&mut self) -> &mut RestClient {
        &mut self.rest
    }

    /// Returns the RPC client, if configured.
    #[must_use]
    pub const fn rpc(&self) -> Option<&RpcClient> {
        self.rpc.as_ref()
    }

    /// Customer endpoints.
    #[must_use]
    pub const fn customers(&self) -> Customers<'_> {
        Customers::new(&self.rest)
    }

    /// Customer group endpoints.
    #[must_use]
    pub const fn customer_groups(&self) -> CustomerGroups<'_> {
        CustomerGroups::new(&self.rest)
    }

    /// Customer address endpoints.
    #[must_use]
    pub const fn customer_addresses(&self) -> CustomerAddresses<'_> {
        CustomerAddresses::new(&self.rest, self.rpc.as_ref())
    }

    /// Category endpoints.
    #[must_use]
    pub const fn categories(&self) -> Categories<'_> {
        Categories::new(&self.rest, self.rpc.as_ref())
    }

    /// Category attribute endpoints.
    #[must_use]
    pub const fn category_attributes(&self) -> CategoryAttributes<'_> {
        CategoryAttributes::new(&self.rest, self.rpc.as_ref())
    }

    /// Product endpoints.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(&self.rest)
    }

    /// Product type endpoints.
    #[must_use]
    pub const fn product_types(&self) -> ProductTypes<'_> {
        ProductTypes::new(&self.rest)
    }

    /// Product attribute endpoints.
    #[must_use]
    pub const fn product_attributes(&self) -> ProductAttributes<'_> {
        ProductAttributes::new(&self.rest)
    }

    /// Product attribute group endpoints.
    #[must_use]
    pub const fn product_attribute_groups(&self) -> ProductAttributeGroups<'_> {
        ProductAttributeGroups::new(&self.rest)
    }

    /// Product attribute set endpoints.
    #[must_use]
    pub const fn product_attribute_sets(&self) -> ProductAttributeSets<'_> {
        ProductAttributeSets::new(&self.rest)
    }

    /// Product image endpoints.
    #[must_use]
    pub const fn product_images(&self) -> ProductImages<'_> {
        ProductImages::new(self.rpc.as_ref())
    }

    /// Product tier price endpoints.
    #[must_use]
    pub const fn product_tier_prices(&self) -> ProductTierPrices<'_> {
        ProductTierPrices::new(self.rpc.as_ref())
    }

    /// Product link endpoints.
    #[must_use]
    pub const fn product_links(&self) -> ProductLinks<'_> {
        ProductLinks::new(self.rpc.as_ref())
    }

    /// Configurable product endpoints.
    #[must_use]
    pub const fn product_configurables(&self) -> ProductConfigurables<'_> {
        ProductConfigurables::new(self.rpc.as_ref())
    }

    /// Inventory endpoints.
    #[must_use]
    pub const fn inventory(&self) -> Inventory<'_> {
        Inventory::new(&self.rest, self.rpc.as_ref())
    }

    /// Country endpoints.
    #[must_use]
    pub const fn countries(&self) -> Countries<'_> {
        Countries::new(&self.rest)
    }
}
