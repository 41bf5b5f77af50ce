//! # brew-order
//!
//! Core of a coffee-ordering storefront: catalog, cart, reorder validation and order
//! lifecycle tracking, built on the actor repositories of [`resource_framework`].
//!
//! ## Module Tour
//!
//! ### Data ([`model`])
//! Products, additions, order items, orders and favorites. Plain data with serde support.
//!
//! ### Repositories ([`product_actor`], [`addition_actor`], [`order_actor`], [`favorite_actor`])
//! One [`ResourceActor`](resource_framework::ResourceActor) per resource. The order actor
//! enforces the status machine
//! `RECEIVED → BREWING → MADE → PICKED_UP → DELIVERED` and re-validates items on submission.
//!
//! ### Interface ([`clients`])
//! [`CatalogClient`](clients::CatalogClient), [`OrderClient`](clients::OrderClient) and
//! [`FavoriteClient`](clients::FavoriteClient) hide message passing and expose the
//! customer, shop and deliverer operations by name.
//!
//! ### Core logic
//! - [`validation`]: reconciles historical items with the current catalog
//! - [`polling`]: repeat-with-delay, bounded retry and error normalization
//! - [`reorder`] and [`tracking`]: the flows assembled from those two
//! - [`cart`] and [`notice`]: caller-side state and messages
//!
//! ### Orchestration ([`lifecycle`], [`config`])
//! [`StorefrontSystem`](lifecycle::StorefrontSystem) spawns and wires the actors from a
//! [`StorefrontConfig`](config::StorefrontConfig).
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod addition_actor;
pub mod cart;
pub mod clients;
pub mod config;
pub mod favorite_actor;
pub mod lifecycle;
pub mod model;
pub mod notice;
pub mod order_actor;
pub mod polling;
pub mod product_actor;
pub mod reorder;
pub mod tracking;
pub mod validation;
