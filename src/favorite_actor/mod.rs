//! # Favorite Actor
//!
//! Stores customers' saved orders. A favorite is a copy of the items at the time it was
//! saved; nothing in the catalog or in order history changes it afterwards.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::FavoriteOrder;
use resource_framework::{ResourceActor, ResourceClient};

/// Creates a new Favorite actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<FavoriteOrder>, ResourceClient<FavoriteOrder>) {
    ResourceActor::new(buffer_size)
}
