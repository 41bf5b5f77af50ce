//! Error types for the Order actor.

use crate::model::{CustomerId, ItemId, OrderId, OrderStatus};
use chrono::{DateTime, Utc};
use resource_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("An order needs at least one item")]
    EmptyOrder,

    #[error("Delivery time must be no earlier than {earliest}")]
    DeliveryTooSoon { earliest: DateTime<Utc> },

    /// Items that no longer match the catalog. Each entry is one diagnostic.
    #[error("Order items are not valid: {}", .0.join("; "))]
    InvalidItems(Vec<String>),

    #[error("Unable to validate products: {0}")]
    CatalogUnavailable(String),

    #[error("Order {0} has already been secured")]
    AlreadySecured(OrderId),

    #[error("Order {order} is not ready for delivery ({status})")]
    NotReady { order: OrderId, status: OrderStatus },

    #[error("Order {order} is not assigned to {who}")]
    NotAssigned { order: OrderId, who: String },

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Order {order} can no longer be changed ({status})")]
    Locked { order: OrderId, status: OrderStatus },

    #[error("Order {order} does not belong to {customer}")]
    NotOwner { order: OrderId, customer: CustomerId },

    #[error("Order {order} has no item {item}")]
    UnknownItem { order: OrderId, item: ItemId },

    #[error("Rating must be between 0 and 5, got {0}")]
    InvalidRating(u8),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(OrderId::new(id)),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}
