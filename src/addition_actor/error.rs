//! Error types for the Addition actor.

use crate::model::AdditionId;
use resource_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdditionError {
    #[error("Addition not found: {0}")]
    NotFound(AdditionId),

    #[error("Addition name must not be blank")]
    BlankName,

    #[error("Invalid price for {name}: {price}")]
    InvalidPrice { name: String, price: f64 },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AdditionError {
    fn from(msg: String) -> Self {
        AdditionError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for AdditionError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => AdditionError::NotFound(AdditionId::new(id)),
            other => other
                .into_entity_error::<AdditionError>()
                .unwrap_or_else(|e| AdditionError::ActorCommunicationError(e.to_string())),
        }
    }
}
