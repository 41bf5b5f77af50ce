//! The customer's cart.
//!
//! Every item gets an [`ItemId`] when it is added, and updates and removals go through
//! that id, so two identical drinks are still two separate lines.

use crate::model::{items_total, CustomerId, ItemId, Location, OrderCreate, OrderItem};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart has no item {0}")]
    UnknownItem(ItemId),
    #[error("Cart is empty")]
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<OrderItem>,
    next_id: u32,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item` under a fresh id, replacing any id it carried.
    pub fn add(&mut self, mut item: OrderItem) -> ItemId {
        self.next_id += 1;
        let id = ItemId::from(self.next_id);
        item.id = Some(id.clone());
        debug!(item_id = %id, product_id = %item.product_id, "Added to cart");
        self.items.push(item);
        id
    }

    pub fn add_all(&mut self, items: impl IntoIterator<Item = OrderItem>) -> Vec<ItemId> {
        items.into_iter().map(|item| self.add(item)).collect()
    }

    pub fn get(&self, id: &ItemId) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id.as_ref() == Some(id))
    }

    /// Replaces the item stored under `id`, keeping its position and id.
    pub fn update(&mut self, id: &ItemId, mut item: OrderItem) -> Result<(), CartError> {
        let slot = self
            .items
            .iter_mut()
            .find(|i| i.id.as_ref() == Some(id))
            .ok_or_else(|| CartError::UnknownItem(id.clone()))?;
        item.id = Some(id.clone());
        *slot = item;
        Ok(())
    }

    pub fn remove(&mut self, id: &ItemId) -> Result<OrderItem, CartError> {
        let position = self
            .items
            .iter()
            .position(|i| i.id.as_ref() == Some(id))
            .ok_or_else(|| CartError::UnknownItem(id.clone()))?;
        Ok(self.items.remove(position))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        items_total(&self.items)
    }

    /// Empties the cart into an order submission.
    pub fn checkout(
        &mut self,
        customer: CustomerId,
        delivery_time: DateTime<Utc>,
        delivery_location: Location,
    ) -> Result<OrderCreate, CartError> {
        if self.items.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(OrderCreate {
            customer_id: customer,
            delivery_time,
            delivery_location,
            items: std::mem::take(&mut self.items),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoffeeType, MilkType};

    fn latte() -> OrderItem {
        OrderItem::new("latte", CoffeeType::Regular, 4.5).with_milk(MilkType::Oat)
    }

    #[test]
    fn identical_items_get_distinct_ids() {
        let mut cart = Cart::new();
        let first = cart.add(latte());
        let second = cart.add(latte());

        assert_ne!(first, second);
        cart.remove(&first).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, Some(second));
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut cart = Cart::new();
        let ids = cart.add_all([latte(), latte(), latte()]);

        cart.update(&ids[1], latte().with_milk(MilkType::Almond))
            .unwrap();

        assert_eq!(cart.items()[1].id.as_ref(), Some(&ids[1]));
        assert_eq!(cart.items()[1].milk_type, Some(MilkType::Almond));
        assert_eq!(cart.items()[0].milk_type, Some(MilkType::Oat));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut cart = Cart::new();
        let id = cart.add(latte());
        cart.remove(&id).unwrap();

        assert_eq!(cart.remove(&id), Err(CartError::UnknownItem(id.clone())));
        assert_eq!(cart.update(&id, latte()), Err(CartError::UnknownItem(id)));
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut cart = Cart::new();
        let first = cart.add(latte());
        cart.clear();
        assert!(cart.is_empty());
        assert_ne!(cart.add(latte()), first);
    }

    #[test]
    fn checkout_drains_the_cart() {
        let mut cart = Cart::new();
        cart.add_all([latte(), latte()]);
        assert_eq!(cart.total(), 9.0);

        let location = Location::new("1 Main St", "Springfield", "IL", "62701");
        let order = cart
            .checkout(CustomerId::new("ana"), Utc::now(), location.clone())
            .unwrap();

        assert_eq!(order.items.len(), 2);
        assert!(cart.is_empty());
        assert_eq!(
            cart.checkout(CustomerId::new("ana"), Utc::now(), location)
                .unwrap_err(),
            CartError::Empty
        );
    }
}
