//! # Addition Actor
//!
//! Stores product additions (syrups, toppings). Disabling an addition hides it from every
//! product that allows it without touching the products themselves.
//!
//! Additions have no custom actions; everything goes through create, upsert and update.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::ProductAddition;
use resource_framework::{ResourceActor, ResourceClient};

/// Creates a new Addition actor and its client.
pub fn new(
    buffer_size: usize,
) -> (ResourceActor<ProductAddition>, ResourceClient<ProductAddition>) {
    ResourceActor::new(buffer_size)
}
