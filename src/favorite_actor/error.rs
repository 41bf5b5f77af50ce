//! Error types for the Favorite actor.

use crate::model::FavoriteId;
use resource_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FavoriteError {
    #[error("Favorite not found: {0}")]
    NotFound(FavoriteId),

    #[error("Favorite name must not be blank")]
    BlankName,

    #[error("Favorite {0} has no items")]
    Empty(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for FavoriteError {
    fn from(msg: String) -> Self {
        FavoriteError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for FavoriteError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => FavoriteError::NotFound(FavoriteId::new(id)),
            other => other
                .into_entity_error::<FavoriteError>()
                .unwrap_or_else(|e| FavoriteError::ActorCommunicationError(e.to_string())),
        }
    }
}
