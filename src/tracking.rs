//! Live views over the order repository, built from the polling primitives.
//!
//! | View | Cadence | Ends |
//! |------|---------|------|
//! | customer order status | standard | at `Delivered`, inclusive |
//! | shop or deliverer "secured" flag | fast | once true, inclusive |
//! | available pending orders / deliveries | standard | never |
//!
//! Every fetch is retried on transient failures before the poll sees it.

use crate::clients::OrderClient;
use crate::config::StorefrontConfig;
use crate::model::{DeliveryOrder, DelivererId, Order, OrderId, OrderStatus, PendingOrder, ShopId};
use crate::polling::{
    poll_after_data, PollConfig, PollReceiver, PollSession, RetryPolicy, ServiceError,
};
use std::future::Future;
use std::time::Duration;
use tracing::info;

pub type Tracked<T> = (PollSession<T, ServiceError>, PollReceiver<T, ServiceError>);

#[derive(Clone)]
pub struct OrderTracker {
    orders: OrderClient,
    standard: Duration,
    fast: Duration,
    capacity: usize,
    retry: RetryPolicy,
}

impl OrderTracker {
    pub fn new(orders: OrderClient, config: &StorefrontConfig) -> Self {
        Self {
            orders,
            standard: config.poll_interval(),
            fast: config.fast_poll_interval(),
            capacity: config.poll_capacity,
            retry: RetryPolicy::from_config(config),
        }
    }

    fn poll<T, F, Fut>(&self, interval: Duration, config: PollConfig<T>, fetch: F) -> Tracked<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(OrderClient) -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = Result<T, ServiceError>> + Send + 'static,
    {
        let orders = self.orders.clone();
        let fetch = self.retry.retrying(move || fetch(orders.clone()));
        let config = PollConfig {
            interval,
            ..config
        }
        .with_capacity(self.capacity);
        poll_after_data(fetch, config)
    }

    /// Follows a customer's order until it is delivered.
    pub fn track_order(&self, id: OrderId) -> Tracked<Order> {
        info!(order_id = %id, "Tracking order");
        let config = PollConfig::default()
            .stop_when(|order: &Order, _| order.status.is_terminal())
            .labeled("order-status");
        self.poll(self.standard, config, move |orders| {
            let id = id.clone();
            async move { Ok::<_, ServiceError>(orders.get_order(id).await?) }
        })
    }

    /// Follows an order a deliverer has secured until it is delivered.
    pub fn track_delivery(&self, deliverer: DelivererId, id: OrderId) -> Tracked<DeliveryOrder> {
        let config = PollConfig::default()
            .stop_when(|order: &DeliveryOrder, _| order.status == OrderStatus::Delivered)
            .labeled("delivery-status");
        self.poll(self.standard, config, move |orders| {
            let (deliverer, id) = (deliverer.clone(), id.clone());
            async move { Ok::<_, ServiceError>(orders.get_delivery(deliverer, id).await?) }
        })
    }

    /// Waits for `shop`'s secure of `id` to become visible.
    pub fn await_secured_by_shop(&self, shop: ShopId, id: OrderId) -> Tracked<bool> {
        self.poll(self.fast, secured_flag("shop-secured"), move |orders| {
            let (shop, id) = (shop.clone(), id.clone());
            async move { Ok::<_, ServiceError>(orders.is_secured_by_shop(shop, id).await?) }
        })
    }

    /// Waits for `deliverer`'s secure of `id` to become visible.
    pub fn await_secured_by_deliverer(&self, deliverer: DelivererId, id: OrderId) -> Tracked<bool> {
        self.poll(self.fast, secured_flag("delivery-secured"), move |orders| {
            let (deliverer, id) = (deliverer.clone(), id.clone());
            async move { Ok::<_, ServiceError>(orders.is_secured_by_deliverer(deliverer, id).await?) }
        })
    }

    /// Orders waiting for a shop. Runs until cancelled.
    pub fn watch_available_pending(&self) -> Tracked<Vec<PendingOrder>> {
        let config = PollConfig::default().labeled("available-pending");
        self.poll(self.standard, config, |orders| async move {
            Ok::<_, ServiceError>(orders.available_pending_orders().await?)
        })
    }

    /// Made orders waiting for a deliverer. Runs until cancelled.
    pub fn watch_available_deliveries(&self) -> Tracked<Vec<DeliveryOrder>> {
        let config = PollConfig::default().labeled("available-deliveries");
        self.poll(self.standard, config, |orders| async move {
            Ok::<_, ServiceError>(orders.available_deliveries().await?)
        })
    }
}

fn secured_flag(label: &'static str) -> PollConfig<bool> {
    PollConfig::default()
        .stop_when(|secured: &bool, _| *secured)
        .inclusive(true)
        .labeled(label)
}
