//! Normalizes repository failures into a [`ServiceError`] callers can show or branch on.
//!
//! Codes are grouped by category:
//! - 0xxx: general
//! - 4xxx: orders
//! - 6xxx: catalog
//! - 9xxx: system

use crate::addition_actor::AdditionError;
use crate::clients::CatalogError;
use crate::favorite_actor::FavoriteError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidRequest = 5,

    // ==================== 4xxx: Order ====================
    OrderLocked = 4001,
    OrderAlreadySecured = 4002,
    OrderNotReady = 4003,
    InvalidStatusTransition = 4004,
    NotAssigned = 4005,
    DeliveryTooSoon = 4006,
    InvalidOrderItems = 4007,

    // ==================== 6xxx: Catalog ====================
    ProductUnavailable = 6001,

    // ==================== 9xxx: System ====================
    ServiceUnavailable = 9001,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::OrderLocked => "Order can no longer be changed",
            ErrorCode::OrderAlreadySecured => "Order has already been secured",
            ErrorCode::OrderNotReady => "Order is not ready",
            ErrorCode::InvalidStatusTransition => "Invalid status change",
            ErrorCode::NotAssigned => "Order is assigned to someone else",
            ErrorCode::DeliveryTooSoon => "Delivery time is too soon",
            ErrorCode::InvalidOrderItems => "Order items are not valid",
            ErrorCode::ProductUnavailable => "Unable to validate products",
            ErrorCode::ServiceUnavailable => "Service unavailable, please try again",
        }
    }

    /// Failures a caller may retry without changing the request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ErrorCode::ServiceUnavailable | ErrorCode::ProductUnavailable
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u16)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            4001 => ErrorCode::OrderLocked,
            4002 => ErrorCode::OrderAlreadySecured,
            4003 => ErrorCode::OrderNotReady,
            4004 => ErrorCode::InvalidStatusTransition,
            4005 => ErrorCode::NotAssigned,
            4006 => ErrorCode::DeliveryTooSoon,
            4007 => ErrorCode::InvalidOrderItems,
            6001 => ErrorCode::ProductUnavailable,
            9001 => ErrorCode::ServiceUnavailable,
            other => return Err(format!("unknown error code {other}")),
        };
        Ok(code)
    }
}

/// A failure as seen by the caller: a stable code and a readable message.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{error_message}")]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    pub error_code: ErrorCode,
    pub error_message: String,
}

impl ServiceError {
    pub fn new(error_code: ErrorCode) -> Self {
        Self {
            error_code,
            error_message: error_code.message().to_string(),
        }
    }

    pub fn with_message(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_code,
            error_message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ServiceUnavailable, message)
    }
}

/// Maps the error of `result` into a [`ServiceError`].
pub fn normalize<T, E: Into<ServiceError>>(result: Result<T, E>) -> Result<T, ServiceError> {
    result.map_err(Into::into)
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        let code = match &e {
            OrderError::NotFound(_) | OrderError::UnknownItem { .. } => ErrorCode::NotFound,
            OrderError::EmptyOrder | OrderError::InvalidRating(_) => ErrorCode::ValidationFailed,
            OrderError::DeliveryTooSoon { .. } => ErrorCode::DeliveryTooSoon,
            OrderError::InvalidItems(_) => ErrorCode::InvalidOrderItems,
            OrderError::CatalogUnavailable(_) => ErrorCode::ProductUnavailable,
            OrderError::AlreadySecured(_) => ErrorCode::OrderAlreadySecured,
            OrderError::NotReady { .. } => ErrorCode::OrderNotReady,
            OrderError::NotAssigned { .. } | OrderError::NotOwner { .. } => ErrorCode::NotAssigned,
            OrderError::InvalidTransition { .. } => ErrorCode::InvalidStatusTransition,
            OrderError::Locked { .. } => ErrorCode::OrderLocked,
            OrderError::ActorCommunicationError(_) => ErrorCode::ServiceUnavailable,
        };
        Self::with_message(code, e.to_string())
    }
}

impl From<ProductError> for ServiceError {
    fn from(e: ProductError) -> Self {
        let code = match &e {
            ProductError::NotFound(_) => ErrorCode::NotFound,
            ProductError::DuplicateAddition { .. } => ErrorCode::AlreadyExists,
            ProductError::ActorCommunicationError(_) => ErrorCode::ServiceUnavailable,
            _ => ErrorCode::ValidationFailed,
        };
        Self::with_message(code, e.to_string())
    }
}

impl From<AdditionError> for ServiceError {
    fn from(e: AdditionError) -> Self {
        let code = match &e {
            AdditionError::NotFound(_) => ErrorCode::NotFound,
            AdditionError::ActorCommunicationError(_) => ErrorCode::ServiceUnavailable,
            _ => ErrorCode::ValidationFailed,
        };
        Self::with_message(code, e.to_string())
    }
}

impl From<CatalogError> for ServiceError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Product(e) => e.into(),
            CatalogError::Addition(e) => e.into(),
        }
    }
}

impl From<FavoriteError> for ServiceError {
    fn from(e: FavoriteError) -> Self {
        let code = match &e {
            FavoriteError::NotFound(_) => ErrorCode::NotFound,
            FavoriteError::ActorCommunicationError(_) => ErrorCode::ServiceUnavailable,
            _ => ErrorCode::ValidationFailed,
        };
        Self::with_message(code, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, OrderStatus};

    #[test]
    fn codes_serialize_as_numbers() {
        let err = ServiceError::new(ErrorCode::OrderLocked);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"errorCode":4001,"errorMessage":"Order can no longer be changed"}"#
        );
        let back: ServiceError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
        assert!(serde_json::from_str::<ErrorCode>("777").is_err());
    }

    #[test]
    fn order_errors_keep_their_message() {
        let err: ServiceError = OrderError::Locked {
            order: OrderId::new("order_1"),
            status: OrderStatus::Brewing,
        }
        .into();
        assert_eq!(err.error_code, ErrorCode::OrderLocked);
        assert_eq!(
            err.error_message,
            "Order order_1 can no longer be changed (Brewing)"
        );
    }

    #[test]
    fn communication_failures_are_transient() {
        let result: Result<(), _> = Err(CatalogError::Product(
            ProductError::ActorCommunicationError("Actor closed".into()),
        ));
        let err = normalize(result).unwrap_err();
        assert_eq!(err.error_code, ErrorCode::ServiceUnavailable);
        assert!(err.error_code.is_transient());
        assert!(!ErrorCode::NotFound.is_transient());
    }
}
