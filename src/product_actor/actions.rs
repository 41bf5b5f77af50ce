//! Custom actions for the Product actor.

use crate::model::AdditionId;

/// Admin operations on the additions a product allows.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Appends an addition to the allowed list. Fails if it is already allowed.
    AllowAddition(AdditionId),
    /// Removes an addition from the allowed list. Returns whether it was present.
    DisallowAddition(AdditionId),
}
