//! # Order Item Validation
//!
//! Reconciles previously ordered items (from order history or a favorite) with the current
//! catalog. Each item is rebuilt from its live product: current base price, a coffee type
//! and milk type the product still offers, and the current version of every addition the
//! product still allows. Anything that had to change is reported as a diagnostic line.
//!
//! An item is only ever dropped when its product is gone from the catalog. The caller's
//! items are never modified, and validating the output a second time reports nothing.

use crate::model::{AdditionId, CatalogProduct, OrderItem, ProductAddition, ProductId};
use std::collections::HashMap;

/// Corrected items plus one diagnostic per correction, in item order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedOrderItems {
    pub order_items: Vec<OrderItem>,
    pub errors: Vec<String>,
}

impl ValidatedOrderItems {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

struct CatalogIndex<'a> {
    products: HashMap<&'a ProductId, &'a CatalogProduct>,
    additions: HashMap<&'a ProductId, HashMap<&'a AdditionId, &'a ProductAddition>>,
}

impl<'a> CatalogIndex<'a> {
    fn new(products: &'a [CatalogProduct]) -> Self {
        let mut index = Self {
            products: HashMap::with_capacity(products.len()),
            additions: HashMap::with_capacity(products.len()),
        };
        for product in products {
            // Unorderable products are treated as missing
            if product.allowed_coffee_types.is_empty() {
                continue;
            }
            index.products.insert(&product.id, product);
            index.additions.insert(
                &product.id,
                product
                    .allowed_additions
                    .iter()
                    .map(|a| (&a.id, a))
                    .collect(),
            );
        }
        index
    }
}

/// Validates `order_items` against `products`. Never fails.
pub fn validate_order_items(
    order_items: &[OrderItem],
    products: &[CatalogProduct],
) -> ValidatedOrderItems {
    let index = CatalogIndex::new(products);
    let mut result = ValidatedOrderItems::default();

    for (position, item) in order_items.iter().enumerate() {
        if let Some(validated) = validate_item(item, position, &index, &mut result.errors) {
            result.order_items.push(validated);
        }
    }
    result
}

fn validate_item(
    item: &OrderItem,
    position: usize,
    index: &CatalogIndex<'_>,
    errors: &mut Vec<String>,
) -> Option<OrderItem> {
    let Some(product) = index.products.get(&item.product_id) else {
        errors.push(format!("Order item {} is not available", position + 1));
        return None;
    };
    let mut validated = product.default_order_item()?;

    if product.allowed_coffee_types.contains(&item.coffee_type) {
        validated.coffee_type = item.coffee_type;
    } else {
        errors.push(format!(
            "{} is not available with {} - defaulting to {}",
            product.name, item.coffee_type, validated.coffee_type
        ));
    }

    let default_milk = product.allowed_milk_types.first().copied();
    match (item.milk_type, default_milk) {
        (Some(milk), Some(_)) if product.allowed_milk_types.contains(&milk) => {
            validated.milk_type = Some(milk);
        }
        (_, Some(fallback)) => {
            errors.push(format!(
                "{} requires a valid milk selection - defaulting to {}",
                product.name, fallback
            ));
        }
        (Some(_), None) => {
            errors.push(format!("{} no longer has a milk selection", product.name));
        }
        (None, None) => {}
    }

    if let Some(additions) = &item.additions {
        let allowed = index.additions.get(&product.id);
        let mut survivors = Vec::with_capacity(additions.len());
        for addition in additions {
            match allowed.and_then(|a| a.get(&addition.id)) {
                Some(live) => survivors.push((*live).clone()),
                None => errors.push(format!(
                    "{} no longer allows {}.",
                    product.name, addition.name
                )),
            }
        }
        validated.additions = Some(survivors);
    }

    Some(validated)
}
