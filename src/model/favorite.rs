use super::{CustomerId, FavoriteId, OrderItem};
use serde::{Deserialize, Serialize};

/// A named snapshot of order items a customer saved for quick reordering.
///
/// Independent of any order: deleting or changing an order never touches a favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteOrder {
    pub id: FavoriteId,
    pub customer_id: CustomerId,
    pub name: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCreate {
    pub customer_id: CustomerId,
    pub name: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavoriteUpdate {
    pub name: Option<String>,
    pub items: Option<Vec<OrderItem>>,
}
