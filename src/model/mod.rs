//! Domain types for the storefront: catalog entries, order items, orders and favorites.
//!
//! Stored entities implement [`ActorEntity`](resource_framework::ActorEntity) in their actor
//! modules; this module holds only the data.

pub mod favorite;
pub mod order;
pub mod product;

pub use favorite::*;
pub use order::*;
pub use product::*;

/// Declares a string-backed identifier type.
///
/// Generated ids render as `{prefix}_{n}`; seeded and external ids keep whatever string they
/// were given (`ProductId::new("espresso")`).
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<u32> for $name {
            fn from(n: u32) -> Self {
                Self(format!(concat!($prefix, "_{}"), n))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a catalog product.
    ProductId,
    "product"
);
string_id!(
    /// Identifier of a product addition (syrups, toppings).
    AdditionId,
    "addition"
);
string_id!(
    /// Identifier of a submitted order.
    OrderId,
    "order"
);
string_id!(
    /// Identifier of an item inside a cart or an order.
    ItemId,
    "item"
);
string_id!(
    /// Identifier of a saved favorite order.
    FavoriteId,
    "favorite"
);
string_id!(CustomerId, "customer");
string_id!(ShopId, "shop");
string_id!(DelivererId, "deliverer");

/// Formats an amount in dollars, e.g. `$5.75`.
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
