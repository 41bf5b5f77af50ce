//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (products, additions,
//! orders, favorites) implements so it can live inside a generic [`ResourceActor`](crate::ResourceActor).
//!
//! The actor plays the role of a repository: it owns an in-memory collection keyed by
//! [`ActorEntity::Id`] and answers `list`, `get`, `upsert`, `create`, `update`, `delete`
//! and custom `action` requests. Production deployments can put a network client behind the
//! same [`ResourceClient`](crate::ResourceClient) API; tests use the in-memory actor or a
//! [`MockClient`](crate::mock::MockClient).
//!
//! # Associated Types
//! Each entity picks its own id, DTOs, actions and error type, so a `ProductCreate` payload
//! can never be sent to the order repository.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::validate`] runs on every create and upsert.
//! - [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `async` so they can call other actors. The `Context` type is injected into
/// every hook when the actor starts (`run(context)`), which lets an order repository hold a
/// catalog client without the two being constructed in a particular order.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation on `create`.
    /// `Ord` keeps `list` results stable.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Secure`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per actor rather than per message: clients match on a single type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier this entity is stored under.
    fn id(&self) -> Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Structural checks applied before the entity enters the store.
    fn validate(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and initialized.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
