//! [`ActorEntity`] implementation for [`ProductAddition`].

use super::error::AdditionError;
use crate::model::{AdditionCreate, AdditionId, AdditionUpdate, ProductAddition};
use async_trait::async_trait;
use resource_framework::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for ProductAddition {
    type Id = AdditionId;
    type Create = AdditionCreate;
    type Update = AdditionUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = AdditionError;

    fn id(&self) -> AdditionId {
        self.id.clone()
    }

    fn from_create_params(id: AdditionId, params: AdditionCreate) -> Result<Self, Self::Error> {
        Ok(ProductAddition::new(id, params.name, params.price))
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() {
            return Err(AdditionError::BlankName);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AdditionError::InvalidPrice {
                name: self.name.clone(),
                price: self.price,
            });
        }
        Ok(())
    }

    async fn on_update(&mut self, update: AdditionUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(price) = update.price {
            next.price = price;
        }
        if let Some(enabled) = update.enabled {
            next.enabled = enabled;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
