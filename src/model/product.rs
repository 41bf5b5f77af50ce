//! Catalog types.
//!
//! A stored [`Product`] references its additions by id so an addition can be repriced or
//! disabled in one place. Readers see a [`CatalogProduct`], which carries the resolved
//! [`ProductAddition`] values that were enabled at the time of the read.

use super::{AdditionId, OrderItem, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The type of coffee used in a drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoffeeType {
    Regular,
    Decaf,
}

impl CoffeeType {
    pub const ALL: [CoffeeType; 2] = [CoffeeType::Regular, CoffeeType::Decaf];

    pub fn display_name(&self) -> &'static str {
        match self {
            CoffeeType::Regular => "Regular",
            CoffeeType::Decaf => "Decaf",
        }
    }
}

impl Display for CoffeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The type of milk used in a drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilkType {
    Regular,
    Skim,
    Oat,
    Almond,
}

impl MilkType {
    pub const ALL: [MilkType; 4] = [
        MilkType::Regular,
        MilkType::Skim,
        MilkType::Oat,
        MilkType::Almond,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MilkType::Regular => "Regular",
            MilkType::Skim => "Skim",
            MilkType::Oat => "Oat",
            MilkType::Almond => "Almond",
        }
    }
}

impl Display for MilkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A priced add-on that can be attached to a drink. Identity is by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAddition {
    pub id: AdditionId,
    pub name: String,
    pub price: f64,
    pub enabled: bool,
}

impl ProductAddition {
    pub fn new(id: impl Into<AdditionId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A product as stored by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub base_price: f64,
    pub enabled: bool,
    /// Never empty for an orderable product.
    pub allowed_coffee_types: Vec<CoffeeType>,
    pub allowed_milk_types: Vec<MilkType>,
    pub allowed_addition_ids: Vec<AdditionId>,
}

impl Product {
    /// Creates an enabled product offering every coffee type, no milk and no additions.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price,
            enabled: true,
            allowed_coffee_types: CoffeeType::ALL.to_vec(),
            allowed_milk_types: Vec::new(),
            allowed_addition_ids: Vec::new(),
        }
    }

    pub fn with_coffee_types(mut self, types: impl IntoIterator<Item = CoffeeType>) -> Self {
        self.allowed_coffee_types = types.into_iter().collect();
        self
    }

    pub fn with_milk_types(mut self, types: impl IntoIterator<Item = MilkType>) -> Self {
        self.allowed_milk_types = types.into_iter().collect();
        self
    }

    pub fn with_additions<I, A>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AdditionId>,
    {
        self.allowed_addition_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Parameters for adding a product with a generated id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub base_price: f64,
    pub allowed_coffee_types: Vec<CoffeeType>,
    #[serde(default)]
    pub allowed_milk_types: Vec<MilkType>,
    #[serde(default)]
    pub allowed_addition_ids: Vec<AdditionId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub base_price: Option<f64>,
    pub enabled: Option<bool>,
    pub allowed_coffee_types: Option<Vec<CoffeeType>>,
    pub allowed_milk_types: Option<Vec<MilkType>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionCreate {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdditionUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub enabled: Option<bool>,
}

/// A product as seen by customers and the order item validator, with its allowed
/// additions resolved to their current values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub base_price: f64,
    pub enabled: bool,
    pub allowed_coffee_types: Vec<CoffeeType>,
    pub allowed_milk_types: Vec<MilkType>,
    pub allowed_additions: Vec<ProductAddition>,
}

impl CatalogProduct {
    /// Resolves `product` against `additions`. Unknown addition ids are skipped.
    pub fn resolve(product: &Product, additions: &[ProductAddition]) -> Self {
        let allowed_additions = product
            .allowed_addition_ids
            .iter()
            .filter_map(|id| additions.iter().find(|a| &a.id == id))
            .cloned()
            .collect();

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            base_price: product.base_price,
            enabled: product.enabled,
            allowed_coffee_types: product.allowed_coffee_types.clone(),
            allowed_milk_types: product.allowed_milk_types.clone(),
            allowed_additions,
        }
    }

    /// The item a customer gets by picking this product without customizing it.
    ///
    /// `None` when the product offers no coffee type and so cannot be ordered.
    pub fn default_order_item(&self) -> Option<OrderItem> {
        let coffee_type = *self.allowed_coffee_types.first()?;
        Some(OrderItem {
            id: None,
            product_id: self.id.clone(),
            coffee_type,
            milk_type: self.allowed_milk_types.first().copied(),
            additions: None,
            base_price: self.base_price,
        })
    }
}
