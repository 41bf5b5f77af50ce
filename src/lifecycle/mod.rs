//! Starts, wires and stops the storefront's actors.

pub mod seed;

use crate::clients::{CatalogClient, FavoriteClient, OrderClient};
use crate::config::StorefrontConfig;
use crate::order_actor::OrderContext;
use crate::polling::RetryPolicy;
use crate::reorder::Reorder;
use crate::tracking::OrderTracker;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// All repositories of the storefront, each running in its own task.
///
/// ```text
/// ProductActor ─┐
///               ├─► CatalogClient ─► OrderActor (context) ─► OrderClient
/// AdditionActor ┘
/// FavoriteActor ─► FavoriteClient
/// ```
pub struct StorefrontSystem {
    pub catalog: CatalogClient,
    pub orders: OrderClient,
    pub favorites: FavoriteClient,
    config: StorefrontConfig,
    /// Order actor first: it holds a catalog client and must stop before the catalog can.
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Spawns every actor. Must be called inside a Tokio runtime.
    pub fn new(config: StorefrontConfig) -> Self {
        let buffer = config.actor_buffer;
        let (product_actor, products) = crate::product_actor::new(buffer);
        let (addition_actor, additions) = crate::addition_actor::new(buffer);
        let (order_actor, orders) = crate::order_actor::new(buffer);
        let (favorite_actor, favorites) = crate::favorite_actor::new(buffer);

        let catalog = CatalogClient::new(products, additions);
        let context = OrderContext {
            catalog: catalog.clone(),
            min_lead_time: config.min_lead_time(),
        };

        let handles = vec![
            tokio::spawn(order_actor.run(context)),
            tokio::spawn(favorite_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(addition_actor.run(())),
        ];
        info!(actors = handles.len(), "Storefront started");

        Self {
            catalog,
            orders: OrderClient::new(orders, config.fees),
            favorites: FavoriteClient::new(favorites),
            config,
            handles,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn tracker(&self) -> OrderTracker {
        OrderTracker::new(self.orders.clone(), &self.config)
    }

    pub fn reorder(&self) -> Reorder {
        Reorder::new(self.catalog.clone(), RetryPolicy::from_config(&self.config))
    }

    /// Drops the system's clients and waits for every actor to drain.
    ///
    /// Clones handed out earlier (trackers, reorder flows, poll sessions) keep their actor
    /// alive; drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down storefront");
        drop(self.catalog);
        drop(self.orders);
        drop(self.favorites);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Storefront stopped");
        Ok(())
    }
}
