//! # Product Actor
//!
//! Stores catalog products. Products reference their allowed additions by id; the
//! [`CatalogClient`](crate::clients::CatalogClient) resolves them when the catalog is read.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] for editing allowed additions
//!
//! Every create, upsert and update is validated: a product must keep a name, a non-negative
//! price and at least one coffee type.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use resource_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
