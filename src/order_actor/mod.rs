//! # Order Actor
//!
//! Stores submitted orders and enforces their lifecycle:
//!
//! ```text
//! RECEIVED --shop secures--> BREWING --shop--> MADE --deliverer secures, then--> PICKED_UP --> DELIVERED
//! ```
//!
//! Transitions only move one step forward and only the shop or deliverer that secured the
//! order may make them. Customers can change or cancel an order until a shop secures it.
//!
//! ## Context
//!
//! The actor runs with an [`OrderContext`]: the catalog client used to re-validate items on
//! submission and the minimum delivery lead time.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CatalogClient;
use crate::model::Order;
use resource_framework::{ResourceActor, ResourceClient};

/// Dependencies injected into the Order actor when it starts.
#[derive(Clone)]
pub struct OrderContext {
    pub catalog: CatalogClient,
    pub min_lead_time: chrono::Duration,
}

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
