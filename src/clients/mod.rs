//! Typed wrappers around [`ResourceClient`](resource_framework::ResourceClient).
//!
//! Callers never talk to a repository directly: each client maps framework failures onto
//! the entity's error type and exposes the operations the storefront needs by name.

#[macro_use]
mod macros;

pub mod catalog_client;
pub mod favorite_client;
pub mod order_client;

pub use catalog_client::*;
pub use favorite_client::*;
pub use order_client::*;
