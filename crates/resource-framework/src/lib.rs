//! # Resource Framework
//!
//! Building blocks for type-safe, in-memory resource repositories backed by Tokio actors.
//! Every resource in the storefront (products, additions, orders, favorites) is an
//! [`ActorEntity`] stored by its own [`ResourceActor`] and reached through a cloneable
//! [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - domain types, DTOs, validation and hooks
//! 2. **Runtime** ([`ResourceActor`]) - the request loop that owns the store
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed request/response calls
//!
//! Requests are processed sequentially within an actor, so no entity is ever shared
//! mutably. Every read returns a clone: callers never hold a reference into the store.
//!
//! ## Example
//!
//! ```rust
//! use resource_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Roast {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Debug)] struct RoastCreate { name: String }
//! #[derive(Debug)] struct RoastUpdate { name: Option<String> }
//! #[derive(Debug)] enum RoastAction {}
//! #[derive(Debug, thiserror::Error)]
//! #[error("{0}")]
//! struct RoastError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Roast {
//!     type Id = u32;
//!     type Create = RoastCreate;
//!     type Update = RoastUpdate;
//!     type Action = RoastAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = RoastError;
//!
//!     fn id(&self) -> u32 { self.id }
//!
//!     fn from_create_params(id: u32, params: RoastCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: params.name })
//!     }
//!
//!     fn validate(&self) -> Result<(), Self::Error> {
//!         if self.name.is_empty() {
//!             return Err(RoastError("name is required".into()));
//!         }
//!         Ok(())
//!     }
//!
//!     async fn on_update(&mut self, update: RoastUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: RoastAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Roast>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(RoastCreate { name: "Dark".into() }).await.unwrap();
//!     let roast = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(roast.name, "Dark");
//!     assert!(client.create(RoastCreate { name: String::new() }).await.is_err());
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`ResourceActor::run`], not to the constructor, so an order
//! repository can receive the catalog client after both actors exist.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations without spawning an
//! actor, which keeps client-wrapper tests fast and deterministic.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
