//! # Generic Messages
//!
//! Requests sent from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants follow the repository shape every resource shares:
///
/// - **List**: every stored entity, ordered by id.
/// - **Get**: one entity by id, `None` when absent.
/// - **Upsert**: insert or replace an entity under its own id.
/// - **Create**: build a new entity from [`ActorEntity::Create`] under a generated id.
/// - **Update**: apply [`ActorEntity::Update`] to an existing entity.
/// - **Delete**: remove an entity.
/// - **Action**: run a custom [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Upsert {
        item: T,
        respond_to: Response<T>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
