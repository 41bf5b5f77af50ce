//! Fulfillment actions for the Order actor.
//!
//! Every action returns the order as it stands after the change.

use crate::model::{CustomerId, DelivererId, ItemId, Location, OrderStatus, ShopId};

/// Who is asking to move an order forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fulfiller {
    Shop(ShopId),
    Deliverer(DelivererId),
}

impl std::fmt::Display for Fulfiller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fulfiller::Shop(id) => write!(f, "shop {id}"),
            Fulfiller::Deliverer(id) => write!(f, "deliverer {id}"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// A shop claims a received order and starts brewing it.
    SecureForPreparation { shop: ShopId, prepared_at: Location },
    /// A deliverer claims a made order.
    SecureForDelivery { deliverer: DelivererId },
    /// Advances the order one step. Shops may only mark orders `Made`; deliverers move
    /// them to `PickedUp` and then `Delivered`.
    UpdateStatus { by: Fulfiller, status: OrderStatus },
    /// Rates one item of the customer's own order, replacing any earlier rating of it.
    Rate {
        customer: CustomerId,
        item: ItemId,
        rating: u8,
    },
}
