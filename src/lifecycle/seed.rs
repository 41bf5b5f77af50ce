//! The demo catalog.

use crate::clients::{CatalogClient, CatalogError};
use crate::model::{CoffeeType, MilkType, Product, ProductAddition};
use tracing::info;

pub fn additions() -> Vec<ProductAddition> {
    vec![
        ProductAddition::new("caramel-syrup", "Caramel Syrup", 0.5),
        ProductAddition::new("chocolate-syrup", "Chocolate Syrup", 0.25),
        ProductAddition::new("hazelnut-syrup", "Hazelnut Syrup", 0.5),
        ProductAddition::new("whipped-cream", "Whipped Cream", 0.3),
        ProductAddition::new("pumpkin-spice-syrup", "Pumpkin Spice Syrup", 0.75).disabled(),
    ]
}

pub fn products() -> Vec<Product> {
    let every_addition: Vec<_> = additions().into_iter().map(|a| a.id).collect();
    vec![
        Product::new("cafe-americano", "Cafe Americano", 5.0)
            .with_milk_types(MilkType::ALL)
            .with_additions(every_addition.clone()),
        Product::new("cappuccino", "Cappuccino", 5.0)
            .with_milk_types([MilkType::Regular, MilkType::Oat]),
        Product::new("espresso", "Espresso", 5.0).with_coffee_types([CoffeeType::Regular]),
        Product::new("caramel-macchiato", "Caramel Macchiato", 5.0)
            .with_coffee_types([CoffeeType::Regular])
            .with_additions(["whipped-cream", "pumpkin-spice-syrup"]),
        Product::new("mocha", "Mocha", 5.0)
            .with_coffee_types([CoffeeType::Regular])
            .with_milk_types([MilkType::Regular, MilkType::Oat])
            .with_additions(every_addition),
    ]
}

/// Loads the demo catalog. Existing entries with the same ids are replaced.
pub async fn seed_catalog(catalog: &CatalogClient) -> Result<(), CatalogError> {
    let additions = additions();
    let products = products();
    let counts = (products.len(), additions.len());

    for addition in additions {
        catalog.upsert_product_addition(addition).await?;
    }
    for product in products {
        catalog.upsert_product(product).await?;
    }

    info!(products = counts.0, additions = counts.1, "Catalog seeded");
    Ok(())
}
