//! [`ActorEntity`] implementation for [`Product`].

use super::actions::ProductAction;
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductUpdate};
use async_trait::async_trait;
use resource_framework::ActorEntity;

#[async_trait]
impl ActorEntity for Product {
    type Id = crate::model::ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = bool;
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }

    fn from_create_params(id: Self::Id, params: ProductCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: params.name,
            base_price: params.base_price,
            enabled: true,
            allowed_coffee_types: params.allowed_coffee_types,
            allowed_milk_types: params.allowed_milk_types,
            allowed_addition_ids: params.allowed_addition_ids,
        })
    }

    /// Rejects blank names, negative prices and products nobody could order.
    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() {
            return Err(ProductError::BlankName);
        }
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(ProductError::InvalidPrice {
                name: self.name.clone(),
                price: self.base_price,
            });
        }
        if self.allowed_coffee_types.is_empty() {
            return Err(ProductError::NoCoffeeTypes(self.name.clone()));
        }
        Ok(())
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(base_price) = update.base_price {
            next.base_price = base_price;
        }
        if let Some(enabled) = update.enabled {
            next.enabled = enabled;
        }
        if let Some(types) = update.allowed_coffee_types {
            next.allowed_coffee_types = types;
        }
        if let Some(types) = update.allowed_milk_types {
            next.allowed_milk_types = types;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<bool, Self::Error> {
        match action {
            ProductAction::AllowAddition(addition) => {
                if self.allowed_addition_ids.contains(&addition) {
                    return Err(ProductError::DuplicateAddition {
                        product: self.id.clone(),
                        addition,
                    });
                }
                self.allowed_addition_ids.push(addition);
                Ok(true)
            }
            ProductAction::DisallowAddition(addition) => {
                let before = self.allowed_addition_ids.len();
                self.allowed_addition_ids.retain(|id| id != &addition);
                Ok(self.allowed_addition_ids.len() != before)
            }
        }
    }
}
