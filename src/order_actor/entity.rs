//! [`ActorEntity`] implementation for [`Order`].
//!
//! Submission is where the catalog is consulted: `on_create` re-validates every item against
//! the enabled catalog and refuses the order if anything would have to be corrected, so a
//! stored order always matches what the customer saw in their cart.

use super::actions::{Fulfiller, OrderAction};
use super::error::OrderError;
use super::OrderContext;
use crate::model::{ItemId, Order, OrderCreate, OrderId, OrderRating, OrderStatus, OrderUpdate};
use crate::validation::validate_order_items;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_framework::ActorEntity;
use tracing::{debug, info};

impl Order {
    fn check_delivery_time(
        delivery_time: DateTime<Utc>,
        ctx: &OrderContext,
    ) -> Result<(), OrderError> {
        let earliest = Utc::now() + ctx.min_lead_time;
        if delivery_time < earliest {
            return Err(OrderError::DeliveryTooSoon { earliest });
        }
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Received || self.shop_id.is_some() {
            return Err(OrderError::Locked {
                order: self.id.clone(),
                status: self.status,
            });
        }
        Ok(())
    }

    fn advance(&mut self, by: &Fulfiller, target: OrderStatus) -> Result<(), OrderError> {
        let assigned = match by {
            Fulfiller::Shop(shop) => self.is_secured_by_shop(shop),
            Fulfiller::Deliverer(deliverer) => self.is_secured_by_deliverer(deliverer),
        };
        if !assigned {
            return Err(OrderError::NotAssigned {
                order: self.id.clone(),
                who: by.to_string(),
            });
        }

        let permitted = match by {
            Fulfiller::Shop(_) => target == OrderStatus::Made,
            Fulfiller::Deliverer(_) => {
                matches!(target, OrderStatus::PickedUp | OrderStatus::Delivered)
            }
        };
        if !permitted || self.status.next() != Some(target) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> OrderId {
        self.id.clone()
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            customer_id: params.customer_id,
            delivery_time: params.delivery_time,
            delivery_location: params.delivery_location,
            items: params.items,
            status: OrderStatus::Received,
            shop_id: None,
            prepared_location: None,
            deliverer_id: None,
            ratings: Vec::new(),
        })
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        Ok(())
    }

    /// Checks the lead time, re-validates the items and numbers them.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        Self::check_delivery_time(self.delivery_time, ctx)?;

        let catalog = ctx
            .catalog
            .get_products(false)
            .await
            .map_err(|e| OrderError::CatalogUnavailable(e.to_string()))?;
        let validated = validate_order_items(&self.items, &catalog);
        if !validated.errors.is_empty() {
            return Err(OrderError::InvalidItems(validated.errors));
        }

        self.items = validated
            .order_items
            .into_iter()
            .zip(1u32..)
            .map(|(mut item, n)| {
                item.id = Some(ItemId::from(n));
                item
            })
            .collect();
        debug!(order_id = %self.id, items = self.items.len(), total = self.total(), "Order items validated");
        Ok(())
    }

    async fn on_update(&mut self, update: OrderUpdate, ctx: &OrderContext) -> Result<(), Self::Error> {
        self.ensure_editable()?;
        if let Some(delivery_time) = update.delivery_time {
            Self::check_delivery_time(delivery_time, ctx)?;
            self.delivery_time = delivery_time;
        }
        if let Some(location) = update.delivery_location {
            self.delivery_location = location;
        }
        Ok(())
    }

    /// Customers may cancel until a shop secures the order.
    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), Self::Error> {
        self.ensure_editable()
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::SecureForPreparation { shop, prepared_at } => {
                if !self.is_available_for_preparation() {
                    return Err(OrderError::AlreadySecured(self.id.clone()));
                }
                info!(order_id = %self.id, %shop, "Secured for preparation");
                self.shop_id = Some(shop);
                self.prepared_location = Some(prepared_at);
                self.status = OrderStatus::Brewing;
            }
            OrderAction::SecureForDelivery { deliverer } => {
                if self.deliverer_id.is_some() {
                    return Err(OrderError::AlreadySecured(self.id.clone()));
                }
                if self.status != OrderStatus::Made {
                    return Err(OrderError::NotReady {
                        order: self.id.clone(),
                        status: self.status,
                    });
                }
                info!(order_id = %self.id, %deliverer, "Secured for delivery");
                self.deliverer_id = Some(deliverer);
            }
            OrderAction::UpdateStatus { by, status } => {
                self.advance(&by, status)?;
                info!(order_id = %self.id, %by, %status, "Status updated");
            }
            OrderAction::Rate {
                customer,
                item,
                rating,
            } => {
                if self.customer_id != customer {
                    return Err(OrderError::NotOwner {
                        order: self.id.clone(),
                        customer,
                    });
                }
                if rating > OrderRating::MAX {
                    return Err(OrderError::InvalidRating(rating));
                }
                if !self.items.iter().any(|i| i.id.as_ref() == Some(&item)) {
                    return Err(OrderError::UnknownItem {
                        order: self.id.clone(),
                        item,
                    });
                }
                self.ratings.retain(|r| r.order_item_id != item);
                self.ratings.push(OrderRating {
                    order_id: self.id.clone(),
                    order_item_id: item,
                    rating,
                });
            }
        }
        Ok(self.clone())
    }
}
