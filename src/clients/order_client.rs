use crate::config::FeeSchedule;
use crate::model::{
    CustomerId, DeliveryOrder, DelivererId, ItemId, Location, Order, OrderCreate, OrderId,
    OrderRating, OrderStatus, OrderUpdate, PendingOrder, ShopId,
};
use crate::order_actor::{Fulfiller, OrderAction, OrderError};
use async_trait::async_trait;
use resource_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for the Order actor, with the customer, shop and deliverer views of an order.
///
/// Shop and deliverer reads are scoped: [`get_pending_order`](Self::get_pending_order) and
/// [`get_delivery`](Self::get_delivery) fail with [`OrderError::NotAssigned`] for orders the
/// caller has not secured.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    fees: FeeSchedule,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, fees: FeeSchedule) -> Self {
        Self { inner, fees }
    }

    pub fn pending_view(&self, order: Order) -> PendingOrder {
        let commission = self.fees.commission(order.total());
        PendingOrder {
            id: order.id,
            delivery_time: order.delivery_time,
            delivery_location: order.delivery_location,
            items: order.items,
            status: order.status,
            commission,
        }
    }

    pub fn delivery_view(&self, order: Order) -> DeliveryOrder {
        let delivery_fee = self.fees.delivery_fee(order.total());
        DeliveryOrder {
            id: order.id,
            delivery_time: order.delivery_time,
            prepared_location: order.prepared_location,
            delivery_location: order.delivery_location,
            items: order.items,
            status: order.status,
            delivery_fee,
        }
    }

    async fn perform(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    async fn list_where(&self, keep: impl Fn(&Order) -> bool) -> Result<Vec<Order>, OrderError> {
        Ok(self.list().await?.into_iter().filter(|o| keep(o)).collect())
    }

    // --- Customer ---

    /// Submits an order. Items are re-validated against the enabled catalog and numbered.
    #[instrument(skip(self, order), fields(customer = %order.customer_id, items = order.items.len()))]
    pub async fn submit_order(&self, order: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(order).await.map_err(Self::map_error)?;
        let order = self.get_order(id).await?;
        info!(order_id = %order.id, total = order.total(), "Order submitted");
        Ok(order)
    }

    /// Like [`get`](ActorClient::get) but a missing order is an error.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id.clone()).await?.ok_or(OrderError::NotFound(id))
    }

    /// The customer's orders, most recent delivery time first.
    #[instrument(skip(self))]
    pub async fn get_order_history(&self, customer: CustomerId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list_where(|o| o.customer_id == customer).await?;
        orders.sort_by(|a, b| b.delivery_time.cmp(&a.delivery_time));
        Ok(orders)
    }

    /// Changes delivery details of an order no shop has secured yet.
    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Cancels an order no shop has secured yet.
    pub async fn cancel_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.delete(id).await
    }

    // --- Shop ---

    #[instrument(skip(self))]
    pub async fn available_pending_orders(&self) -> Result<Vec<PendingOrder>, OrderError> {
        let orders = self.list_where(Order::is_available_for_preparation).await?;
        Ok(orders.into_iter().map(|o| self.pending_view(o)).collect())
    }

    #[instrument(skip(self))]
    pub async fn pending_orders_prepared_by(
        &self,
        shop: ShopId,
    ) -> Result<Vec<PendingOrder>, OrderError> {
        let orders = self.list_where(|o| o.is_secured_by_shop(&shop)).await?;
        Ok(orders.into_iter().map(|o| self.pending_view(o)).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_pending_order(
        &self,
        shop: ShopId,
        id: OrderId,
    ) -> Result<PendingOrder, OrderError> {
        let order = self.get_order(id).await?;
        if !order.is_secured_by_shop(&shop) {
            return Err(OrderError::NotAssigned {
                order: order.id,
                who: Fulfiller::Shop(shop).to_string(),
            });
        }
        Ok(self.pending_view(order))
    }

    #[instrument(skip(self))]
    pub async fn secure_pending_order(
        &self,
        shop: ShopId,
        id: OrderId,
        prepared_at: Location,
    ) -> Result<PendingOrder, OrderError> {
        debug!("Sending request");
        let order = self
            .perform(id, OrderAction::SecureForPreparation { shop, prepared_at })
            .await?;
        Ok(self.pending_view(order))
    }

    #[instrument(skip(self))]
    pub async fn update_pending_order_status(
        &self,
        shop: ShopId,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<PendingOrder, OrderError> {
        debug!("Sending request");
        let by = Fulfiller::Shop(shop);
        let order = self.perform(id, OrderAction::UpdateStatus { by, status }).await?;
        Ok(self.pending_view(order))
    }

    /// `Ok(false)` when the order is missing or belongs to another shop.
    pub async fn is_secured_by_shop(&self, shop: ShopId, id: OrderId) -> Result<bool, OrderError> {
        secured(self.get_pending_order(shop, id).await)
    }

    // --- Deliverer ---

    #[instrument(skip(self))]
    pub async fn available_deliveries(&self) -> Result<Vec<DeliveryOrder>, OrderError> {
        let orders = self.list_where(Order::is_available_for_delivery).await?;
        Ok(orders.into_iter().map(|o| self.delivery_view(o)).collect())
    }

    #[instrument(skip(self))]
    pub async fn deliveries_by(
        &self,
        deliverer: DelivererId,
    ) -> Result<Vec<DeliveryOrder>, OrderError> {
        let orders = self
            .list_where(|o| o.is_secured_by_deliverer(&deliverer))
            .await?;
        Ok(orders.into_iter().map(|o| self.delivery_view(o)).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_delivery(
        &self,
        deliverer: DelivererId,
        id: OrderId,
    ) -> Result<DeliveryOrder, OrderError> {
        let order = self.get_order(id).await?;
        if !order.is_secured_by_deliverer(&deliverer) {
            return Err(OrderError::NotAssigned {
                order: order.id,
                who: Fulfiller::Deliverer(deliverer).to_string(),
            });
        }
        Ok(self.delivery_view(order))
    }

    #[instrument(skip(self))]
    pub async fn secure_delivery(
        &self,
        deliverer: DelivererId,
        id: OrderId,
    ) -> Result<DeliveryOrder, OrderError> {
        debug!("Sending request");
        let order = self
            .perform(id, OrderAction::SecureForDelivery { deliverer })
            .await?;
        Ok(self.delivery_view(order))
    }

    #[instrument(skip(self))]
    pub async fn update_delivery_status(
        &self,
        deliverer: DelivererId,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<DeliveryOrder, OrderError> {
        debug!("Sending request");
        let by = Fulfiller::Deliverer(deliverer);
        let order = self.perform(id, OrderAction::UpdateStatus { by, status }).await?;
        Ok(self.delivery_view(order))
    }

    /// `Ok(false)` when the order is missing or carried by another deliverer.
    pub async fn is_secured_by_deliverer(
        &self,
        deliverer: DelivererId,
        id: OrderId,
    ) -> Result<bool, OrderError> {
        secured(self.get_delivery(deliverer, id).await)
    }

    // --- Ratings ---

    #[instrument(skip(self))]
    pub async fn rate_order_item(
        &self,
        customer: CustomerId,
        id: OrderId,
        item: ItemId,
        rating: u8,
    ) -> Result<OrderRating, OrderError> {
        debug!("Sending request");
        let order = self
            .perform(
                id.clone(),
                OrderAction::Rate {
                    customer,
                    item: item.clone(),
                    rating,
                },
            )
            .await?;
        order
            .ratings
            .into_iter()
            .find(|r| r.order_item_id == item)
            .ok_or(OrderError::UnknownItem { order: id, item })
    }

    pub async fn get_order_ratings(&self, id: OrderId) -> Result<Vec<OrderRating>, OrderError> {
        Ok(self.get_order(id).await?.ratings)
    }
}

fn secured<T>(result: Result<T, OrderError>) -> Result<bool, OrderError> {
    match result {
        Ok(_) => Ok(true),
        Err(OrderError::NotFound(_) | OrderError::NotAssigned { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}
