//! [`ActorEntity`] implementation for [`FavoriteOrder`].

use super::error::FavoriteError;
use crate::model::{FavoriteCreate, FavoriteId, FavoriteOrder, FavoriteUpdate};
use async_trait::async_trait;
use resource_framework::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for FavoriteOrder {
    type Id = FavoriteId;
    type Create = FavoriteCreate;
    type Update = FavoriteUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = FavoriteError;

    fn id(&self) -> FavoriteId {
        self.id.clone()
    }

    fn from_create_params(id: FavoriteId, params: FavoriteCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            customer_id: params.customer_id,
            name: params.name.trim().to_string(),
            items: params.items,
        })
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.name.trim().is_empty() {
            return Err(FavoriteError::BlankName);
        }
        if self.items.is_empty() {
            return Err(FavoriteError::Empty(self.name.clone()));
        }
        Ok(())
    }

    async fn on_update(&mut self, update: FavoriteUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name.trim().to_string();
        }
        if let Some(items) = update.items {
            next.items = items;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
