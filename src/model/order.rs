//! Orders, their items and the fulfillment projections shown to shops and deliverers.

use super::{
    CoffeeType, CustomerId, DelivererId, ItemId, MilkType, OrderId, ProductAddition, ProductId,
    ShopId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle of an order. Strictly forward, terminal at `Delivered`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Received,
    Brewing,
    Made,
    PickedUp,
    Delivered,
}

impl OrderStatus {
    /// The status that follows this one, `None` at the terminal state.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Received => Some(OrderStatus::Brewing),
            OrderStatus::Brewing => Some(OrderStatus::Made),
            OrderStatus::Made => Some(OrderStatus::PickedUp),
            OrderStatus::PickedUp => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }

    /// Progress shown on the order status bar.
    pub fn progress_percent(self) -> u8 {
        match self {
            OrderStatus::Received => 0,
            OrderStatus::Brewing => 25,
            OrderStatus::Made => 50,
            OrderStatus::PickedUp => 75,
            OrderStatus::Delivered => 100,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::Brewing => "Brewing",
            OrderStatus::Made => "Made",
            OrderStatus::PickedUp => "Picked Up",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Address information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: Option<String>,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Location {
    pub fn new(
        street_address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            name: None,
            street_address: street_address.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}, ")?;
        }
        write!(
            f,
            "{}, {}, {} {}",
            self.street_address, self.city, self.state, self.zip
        )
    }
}

/// A drink in a cart, a favorite or a submitted order.
///
/// Additions are snapshots taken when the item was built, so a historical item keeps the
/// prices it was ordered at. `additions` is `None` when the item never had an additions list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub product_id: ProductId,
    pub coffee_type: CoffeeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milk_type: Option<MilkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<Vec<ProductAddition>>,
    pub base_price: f64,
}

impl OrderItem {
    pub fn new(product_id: impl Into<ProductId>, coffee_type: CoffeeType, base_price: f64) -> Self {
        Self {
            id: None,
            product_id: product_id.into(),
            coffee_type,
            milk_type: None,
            additions: None,
            base_price,
        }
    }

    pub fn with_milk(mut self, milk_type: MilkType) -> Self {
        self.milk_type = Some(milk_type);
        self
    }

    pub fn with_additions(mut self, additions: Vec<ProductAddition>) -> Self {
        self.additions = Some(additions);
        self
    }

    /// Base price plus every addition.
    pub fn price(&self) -> f64 {
        let additions: f64 = self.additions.iter().flatten().map(|a| a.price).sum();
        self.base_price + additions
    }
}

/// Sum of the item prices.
pub fn items_total(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::price).sum()
}

/// A customer's rating of one item of an order, on an integer scale of 0-5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRating {
    pub order_id: OrderId,
    pub order_item_id: ItemId,
    pub rating: u8,
}

impl OrderRating {
    pub const MAX: u8 = 5;
}

/// A submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub delivery_time: DateTime<Utc>,
    pub delivery_location: Location,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Shop preparing the order, set when a shop secures it.
    pub shop_id: Option<ShopId>,
    pub prepared_location: Option<Location>,
    /// Deliverer carrying the order, set when a deliverer secures it.
    pub deliverer_id: Option<DelivererId>,
    #[serde(default)]
    pub ratings: Vec<OrderRating>,
}

impl Order {
    pub fn total(&self) -> f64 {
        items_total(&self.items)
    }

    pub fn is_secured_by_shop(&self, shop: &ShopId) -> bool {
        self.shop_id.as_ref() == Some(shop)
    }

    pub fn is_secured_by_deliverer(&self, deliverer: &DelivererId) -> bool {
        self.deliverer_id.as_ref() == Some(deliverer)
    }

    /// Waiting for a shop to pick it up.
    pub fn is_available_for_preparation(&self) -> bool {
        self.shop_id.is_none() && self.status == OrderStatus::Received
    }

    /// Made and waiting for a deliverer.
    pub fn is_available_for_delivery(&self) -> bool {
        self.deliverer_id.is_none() && self.status == OrderStatus::Made
    }
}

/// Parameters for submitting an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub customer_id: CustomerId,
    pub delivery_time: DateTime<Utc>,
    pub delivery_location: Location,
    pub items: Vec<OrderItem>,
}

/// Changes a customer may make while the order is still `Received`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub delivery_time: Option<DateTime<Utc>>,
    pub delivery_location: Option<Location>,
}

/// An order as shown to shop owners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrder {
    pub id: OrderId,
    pub delivery_time: DateTime<Utc>,
    pub delivery_location: Location,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Payment amount to prepare the order.
    pub commission: f64,
}

/// An order as shown to deliverers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrder {
    pub id: OrderId,
    pub delivery_time: DateTime<Utc>,
    pub prepared_location: Option<Location>,
    pub delivery_location: Location,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Payment amount to perform the delivery.
    pub delivery_fee: f64,
}
