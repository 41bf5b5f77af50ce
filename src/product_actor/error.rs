//! Error types for the Product actor.

use crate::model::{AdditionId, ProductId};
use resource_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A product must be orderable with at least one coffee type.
    #[error("{0} must allow at least one coffee type")]
    NoCoffeeTypes(String),

    #[error("Product name must not be blank")]
    BlankName,

    #[error("Invalid price for {name}: {price}")]
    InvalidPrice { name: String, price: f64 },

    #[error("{product} already allows addition {addition}")]
    DuplicateAddition {
        product: ProductId,
        addition: AdditionId,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(ProductId::new(id)),
            other => other
                .into_entity_error::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}
