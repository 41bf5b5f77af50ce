//! Reordering from order history or a favorite.
//!
//! The historical items are validated against the enabled catalog and whatever survives is
//! added to the cart as new items. The source order or favorite is only read.

use crate::cart::Cart;
use crate::clients::{CatalogClient, FavoriteClient, OrderClient};
use crate::favorite_actor::FavoriteError;
use crate::model::{FavoriteId, ItemId, OrderId, OrderItem};
use crate::notice::{self, Notice};
use crate::order_actor::OrderError;
use crate::polling::{RetryPolicy, ServiceError};
use crate::validation::validate_order_items;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReorderError {
    /// The catalog could not be read, so nothing was validated.
    #[error("{}", notice::CATALOG_UNAVAILABLE)]
    CatalogUnavailable(#[source] ServiceError),

    #[error("{}", notice::NOTHING_AVAILABLE)]
    NothingAvailable { issues: Vec<String> },

    #[error("{0}")]
    Order(#[from] OrderError),

    #[error("{0}")]
    Favorite(#[from] FavoriteError),
}

impl ReorderError {
    /// Notices to show, in order.
    pub fn notices(&self, issue_duration: Duration) -> Vec<Notice> {
        match self {
            ReorderError::CatalogUnavailable(_) => vec![Notice::catalog_unavailable()],
            ReorderError::NothingAvailable { issues } => {
                let mut notices = Vec::with_capacity(2);
                if !issues.is_empty() {
                    notices.push(Notice::issues(issues, issue_duration));
                }
                notices.push(Notice::acknowledge(notice::NOTHING_AVAILABLE));
                notices
            }
            ReorderError::Order(e) => vec![Notice::failure("load order", e)],
            ReorderError::Favorite(e) => vec![Notice::failure("load favorite", e)],
        }
    }
}

/// Items a reorder put in the cart and the corrections it made on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderOutcome {
    pub added: Vec<ItemId>,
    pub issues: Vec<String>,
}

impl ReorderOutcome {
    pub fn notice(&self, duration: Duration) -> Option<Notice> {
        (!self.issues.is_empty()).then(|| Notice::issues(&self.issues, duration))
    }
}

#[derive(Clone)]
pub struct Reorder {
    catalog: CatalogClient,
    retry: RetryPolicy,
}

impl Reorder {
    pub fn new(catalog: CatalogClient, retry: RetryPolicy) -> Self {
        Self { catalog, retry }
    }

    /// Validates `items` and adds the survivors to `cart`.
    #[instrument(skip_all, fields(items = items.len()))]
    pub async fn reorder_items(
        &self,
        cart: &mut Cart,
        items: &[OrderItem],
    ) -> Result<ReorderOutcome, ReorderError> {
        let products = self
            .retry
            .run(|| self.catalog.get_products(false))
            .await
            .map_err(|e| {
                warn!(error = %e, "Catalog unavailable");
                ReorderError::CatalogUnavailable(e.into())
            })?;

        let validated = validate_order_items(items, &products);
        if validated.order_items.is_empty() {
            return Err(ReorderError::NothingAvailable {
                issues: validated.errors,
            });
        }

        let added = cart.add_all(validated.order_items);
        info!(added = added.len(), issues = validated.errors.len(), "Reordered");
        Ok(ReorderOutcome {
            added,
            issues: validated.errors,
        })
    }

    #[instrument(skip(self, orders, cart))]
    pub async fn reorder_order(
        &self,
        orders: &OrderClient,
        cart: &mut Cart,
        id: OrderId,
    ) -> Result<ReorderOutcome, ReorderError> {
        let order = self.retry.run(|| orders.get_order(id.clone())).await?;
        self.reorder_items(cart, &order.items).await
    }

    #[instrument(skip(self, favorites, cart))]
    pub async fn reorder_favorite(
        &self,
        favorites: &FavoriteClient,
        cart: &mut Cart,
        id: FavoriteId,
    ) -> Result<ReorderOutcome, ReorderError> {
        let favorite = self
            .retry
            .run(|| favorites.get_favorite(id.clone()))
            .await?;
        self.reorder_items(cart, &favorite.items).await
    }

    /// Whether reordering can be offered at all. A failed catalog read counts as no.
    pub async fn reorder_available(&self) -> bool {
        match self.catalog.get_products(false).await {
            Ok(products) => !products.is_empty(),
            Err(e) => {
                warn!(error = %e, "Reorder unavailable");
                false
            }
        }
    }
}
