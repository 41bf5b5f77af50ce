use crate::addition_actor::AdditionError;
use crate::model::{
    AdditionCreate, AdditionId, AdditionUpdate, CatalogProduct, Product, ProductAddition,
    ProductCreate, ProductId, ProductUpdate,
};
use crate::product_actor::{ProductAction, ProductError};
use resource_framework::ResourceClient;
use thiserror::Error;
use tracing::{debug, instrument};

/// Failure of a catalog operation that may touch either repository.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Addition(#[from] AdditionError),
}

/// Client for the catalog: products plus the additions they reference.
#[derive(Clone)]
pub struct CatalogClient {
    products: ResourceClient<Product>,
    additions: ResourceClient<ProductAddition>,
}

impl_repository_methods!(CatalogClient, products, Product, ProductId, ProductError, product);
impl_repository_methods!(
    CatalogClient,
    additions,
    ProductAddition,
    AdditionId,
    AdditionError,
    product_addition
);

impl CatalogClient {
    pub fn new(
        products: ResourceClient<Product>,
        additions: ResourceClient<ProductAddition>,
    ) -> Self {
        Self {
            products,
            additions,
        }
    }

    /// Products with their allowed additions resolved.
    ///
    /// Unless `include_disabled` is set, disabled products are skipped and disabled
    /// additions are left out of every product's allowed list.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        include_disabled: bool,
    ) -> Result<Vec<CatalogProduct>, CatalogError> {
        debug!("Sending request");
        let products = self.products.list().await.map_err(ProductError::from)?;
        let additions = self.get_product_additions(include_disabled).await?;

        Ok(products
            .iter()
            .filter(|p| include_disabled || p.enabled)
            .map(|p| CatalogProduct::resolve(p, &additions))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_product_additions(
        &self,
        include_disabled: bool,
    ) -> Result<Vec<ProductAddition>, CatalogError> {
        debug!("Sending request");
        let additions = self.additions.list().await.map_err(AdditionError::from)?;
        Ok(additions
            .into_iter()
            .filter(|a| include_disabled || a.enabled)
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn add_product(&self, product: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.products.create(product).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn add_product_addition(
        &self,
        addition: AdditionCreate,
    ) -> Result<AdditionId, AdditionError> {
        debug!("Sending request");
        self.additions
            .create(addition)
            .await
            .map_err(AdditionError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.products
            .update(id, update)
            .await
            .map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_product_addition(
        &self,
        id: AdditionId,
        update: AdditionUpdate,
    ) -> Result<ProductAddition, AdditionError> {
        debug!("Sending request");
        self.additions
            .update(id, update)
            .await
            .map_err(AdditionError::from)
    }

    /// Lets `product` be ordered with `addition`. The addition must exist.
    #[instrument(skip(self))]
    pub async fn allow_addition(
        &self,
        product: ProductId,
        addition: AdditionId,
    ) -> Result<(), CatalogError> {
        debug!("Sending request");
        if self.get_product_addition(addition.clone()).await?.is_none() {
            return Err(AdditionError::NotFound(addition).into());
        }
        self.products
            .perform_action(product, ProductAction::AllowAddition(addition))
            .await
            .map_err(ProductError::from)?;
        Ok(())
    }

    /// Returns whether the addition was allowed before.
    #[instrument(skip(self))]
    pub async fn disallow_addition(
        &self,
        product: ProductId,
        addition: AdditionId,
    ) -> Result<bool, ProductError> {
        debug!("Sending request");
        self.products
            .perform_action(product, ProductAction::DisallowAddition(addition))
            .await
            .map_err(ProductError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockClient;
    use resource_framework::FrameworkError;

    fn mocks() -> (MockClient<Product>, MockClient<ProductAddition>) {
        (MockClient::new(), MockClient::new())
    }

    #[tokio::test]
    async fn enabled_catalog_hides_disabled_entries() {
        let (mut products, mut additions) = mocks();
        products.expect_list().return_ok(vec![
            Product::new("mocha", "Mocha", 5.0).with_additions(["caramel", "pumpkin"]),
            Product::new("retired", "Retired Roast", 4.0).disabled(),
        ]);
        additions.expect_list().return_ok(vec![
            ProductAddition::new("caramel", "Caramel Syrup", 0.5),
            ProductAddition::new("pumpkin", "Pumpkin Spice Syrup", 0.75).disabled(),
        ]);

        let catalog = CatalogClient::new(products.client(), additions.client());
        let result = catalog.get_products(false).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Mocha");
        assert_eq!(result[0].allowed_additions.len(), 1);
        assert_eq!(result[0].allowed_additions[0].name, "Caramel Syrup");
        products.verify();
        additions.verify();
    }

    #[tokio::test]
    async fn full_catalog_includes_disabled_entries() {
        let (mut products, mut additions) = mocks();
        products.expect_list().return_ok(vec![
            Product::new("mocha", "Mocha", 5.0).with_additions(["pumpkin"]),
            Product::new("retired", "Retired Roast", 4.0).disabled(),
        ]);
        additions.expect_list().return_ok(vec![ProductAddition::new(
            "pumpkin",
            "Pumpkin Spice Syrup",
            0.75,
        )
        .disabled()]);

        let catalog = CatalogClient::new(products.client(), additions.client());
        let result = catalog.get_products(true).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].allowed_additions.len(), 1);
    }

    #[tokio::test]
    async fn product_read_failure_is_reported() {
        let (mut products, additions) = mocks();
        products
            .expect_list()
            .return_err(FrameworkError::ActorClosed);

        let catalog = CatalogClient::new(products.client(), additions.client());
        let err = catalog.get_products(false).await.unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Product(ProductError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn allowing_unknown_addition_fails_without_touching_product() {
        let (products, mut additions) = mocks();
        additions.expect_get(AdditionId::new("ghost")).return_ok(None);

        let catalog = CatalogClient::new(products.client(), additions.client());
        let err = catalog
            .allow_addition(ProductId::new("mocha"), AdditionId::new("ghost"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CatalogError::Addition(AdditionError::NotFound(AdditionId::new("ghost")))
        );
        products.verify();
        additions.verify();
    }
}
