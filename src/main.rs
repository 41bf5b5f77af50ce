//! Storefront demo.
//!
//! Seeds the catalog, places an order from a cart, lets a shop and a deliverer fulfil it
//! while the customer's tracker follows along, then reorders a stale favorite.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use brew_order::cart::Cart;
use brew_order::config::StorefrontConfig;
use brew_order::lifecycle::{seed, StorefrontSystem};
use brew_order::model::{
    CoffeeType, CustomerId, DelivererId, Location, MilkType, OrderItem, OrderStatus,
    ProductAddition, ShopId,
};
use brew_order::notice::Notice;
use chrono::Utc;
use resource_framework::tracing::setup_tracing;
use tracing::{info, info_span, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = StorefrontConfig::from_env()?;
    info!(?config, "Starting storefront");
    let system = StorefrontSystem::new(config);
    seed::seed_catalog(&system.catalog).await?;

    let customer = CustomerId::new("ana");
    let shop = ShopId::new("shop_downtown");
    let deliverer = DelivererId::new("deliverer_sam");
    let home = Location::new("12 Elm St", "Springfield", "IL", "62704").named("Home");

    // Customer fills a cart from the catalog and submits it
    let products = system.catalog.get_products(false).await?;
    let mut cart = Cart::new();
    for product in products.iter().filter(|p| p.name != "Espresso") {
        if let Some(item) = product.default_order_item() {
            cart.add(item);
        }
    }
    info!(items = cart.len(), total = %brew_order::model::format_price(cart.total()), "Cart ready");

    let delivery_time = Utc::now() + system.config().min_lead_time() + chrono::Duration::minutes(15);
    let order = system
        .orders
        .submit_order(cart.checkout(customer.clone(), delivery_time, home)?)
        .instrument(info_span!("checkout"))
        .await?;

    let tracker = system.tracker();
    let (_session, mut status) = tracker.track_order(order.id.clone());
    let follow = tokio::spawn(
        async move {
            while let Some(update) = status.next().await {
                match update {
                    Ok(order) => info!(
                        status = %order.status,
                        progress = order.status.progress_percent(),
                        "Order status"
                    ),
                    Err(e) => warn!("{}", Notice::failure("load order", &e)),
                }
            }
        }
        .instrument(info_span!("customer")),
    );

    // Shop secures, brews and hands off
    let kitchen = Location::new("400 Main St", "Springfield", "IL", "62701").named("Downtown");
    let pending = system
        .orders
        .secure_pending_order(shop.clone(), order.id.clone(), kitchen)
        .await?;
    info!(order_id = %pending.id, commission = pending.commission, "Shop secured order");
    let (_secured, flag) = tracker.await_secured_by_shop(shop.clone(), order.id.clone());
    info!(confirmations = flag.collect().await.len(), "Shop secure confirmed");
    system
        .orders
        .update_pending_order_status(shop, order.id.clone(), OrderStatus::Made)
        .await?;

    // Deliverer picks it up and delivers
    let delivery = system
        .orders
        .secure_delivery(deliverer.clone(), order.id.clone())
        .await?;
    info!(order_id = %delivery.id, fee = delivery.delivery_fee, "Deliverer secured order");
    for next in [OrderStatus::PickedUp, OrderStatus::Delivered] {
        system
            .orders
            .update_delivery_status(deliverer.clone(), order.id.clone(), next)
            .await?;
    }
    follow.await?;

    // A favorite saved before the menu changed
    let favorite = system
        .favorites
        .add_favorite(
            customer.clone(),
            "Autumn usual",
            vec![
                OrderItem::new("espresso", CoffeeType::Regular, 4.0).with_milk(MilkType::Oat),
                OrderItem::new("mocha", CoffeeType::Regular, 5.0)
                    .with_milk(MilkType::Oat)
                    .with_additions(vec![ProductAddition::new(
                        "pumpkin-spice-syrup",
                        "Pumpkin Spice Syrup",
                        0.75,
                    )]),
                OrderItem::new("flat-white", CoffeeType::Regular, 4.5),
            ],
        )
        .await?;

    let reorder = system.reorder();
    let mut cart = Cart::new();
    let duration = system.config().notice_duration();
    match reorder
        .reorder_favorite(&system.favorites, &mut cart, favorite)
        .await
    {
        Ok(outcome) => {
            info!(added = outcome.added.len(), "Favorite added to cart");
            if let Some(notice) = outcome.notice(duration) {
                warn!("{}", notice.message);
            }
        }
        Err(e) => {
            for notice in e.notices(duration) {
                warn!("{notice}");
            }
        }
    }

    drop(reorder);
    drop(tracker);
    system.shutdown().await?;
    Ok(())
}
