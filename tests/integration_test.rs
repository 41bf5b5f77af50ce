use brew_order::config::StorefrontConfig;
use brew_order::favorite_actor::FavoriteError;
use brew_order::lifecycle::{seed, StorefrontSystem};
use brew_order::model::{
    CoffeeType, CustomerId, DelivererId, ItemId, Location, MilkType, OrderCreate, OrderItem,
    OrderStatus, OrderUpdate, ProductAddition, ShopId,
};
use brew_order::order_actor::OrderError;
use chrono::Utc;
use resource_framework::ActorClient;

/// Captured per test; run with `--nocapture` and `RUST_LOG=debug` to see actor traffic.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn seeded_system() -> StorefrontSystem {
    init_tracing();
    let system = StorefrontSystem::new(StorefrontConfig::default());
    seed::seed_catalog(&system.catalog)
        .await
        .expect("Failed to seed catalog");
    system
}

fn home() -> Location {
    Location::new("12 Elm St", "Springfield", "IL", "62704").named("Home")
}

fn kitchen() -> Location {
    Location::new("400 Main St", "Springfield", "IL", "62701").named("Downtown")
}

fn mocha_with_caramel() -> OrderItem {
    OrderItem::new("mocha", CoffeeType::Regular, 5.0)
        .with_milk(MilkType::Regular)
        .with_additions(vec![ProductAddition::new("caramel-syrup", "Caramel Syrup", 0.5)])
}

fn decaf_americano() -> OrderItem {
    OrderItem::new("cafe-americano", CoffeeType::Decaf, 5.0).with_milk(MilkType::Almond)
}

fn submission(customer: &str, items: Vec<OrderItem>) -> OrderCreate {
    OrderCreate {
        customer_id: CustomerId::new(customer),
        delivery_time: Utc::now() + chrono::Duration::hours(1),
        delivery_location: home(),
        items,
    }
}

#[tokio::test]
async fn test_seeded_catalog_hides_disabled_additions() {
    let system = seeded_system().await;

    let products = system.catalog.get_products(false).await.unwrap();
    assert_eq!(products.len(), 5);

    let macchiato = products
        .iter()
        .find(|p| p.id.as_str() == "caramel-macchiato")
        .expect("Caramel Macchiato not seeded");
    let additions: Vec<&str> = macchiato
        .allowed_additions
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(additions, vec!["Whipped Cream"]);

    let all_additions = system.catalog.get_product_additions(true).await.unwrap();
    assert_eq!(all_additions.len(), 5);

    system.shutdown().await.unwrap();
}

/// Walks one order from submission to delivery, checking who may do what at each step.
#[tokio::test]
async fn test_full_fulfillment_lifecycle() {
    let system = seeded_system().await;
    let orders = &system.orders;
    let customer = CustomerId::new("ana");
    let shop = ShopId::new("shop_downtown");
    let rival = ShopId::new("shop_uptown");
    let deliverer = DelivererId::new("deliverer_sam");

    let order = orders
        .submit_order(submission("ana", vec![mocha_with_caramel(), decaf_americano()]))
        .await
        .expect("Failed to submit order");
    let id = order.id.clone();
    assert_eq!(order.status, OrderStatus::Received);
    assert_eq!(order.items[1].id, Some(ItemId::new("item_2")));
    assert!((order.total() - 10.5).abs() < 1e-9);

    // Waiting for a shop
    let pending = orders.available_pending_orders().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].commission, 1.05);
    assert!(orders.available_deliveries().await.unwrap().is_empty());

    let err = orders.secure_delivery(deliverer.clone(), id.clone()).await.unwrap_err();
    assert!(matches!(err, OrderError::NotReady { .. }), "{err:?}");

    // Shop secures; the customer can no longer change it
    let secured = orders
        .secure_pending_order(shop.clone(), id.clone(), kitchen())
        .await
        .unwrap();
    assert_eq!(secured.status, OrderStatus::Brewing);
    assert!(orders.is_secured_by_shop(shop.clone(), id.clone()).await.unwrap());
    assert!(!orders.is_secured_by_shop(rival.clone(), id.clone()).await.unwrap());
    assert!(orders.available_pending_orders().await.unwrap().is_empty());

    let err = orders
        .secure_pending_order(rival.clone(), id.clone(), kitchen())
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::AlreadySecured(id.clone()));

    let err = orders
        .update_order(
            id.clone(),
            OrderUpdate {
                delivery_location: Some(kitchen()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Locked { .. }), "{err:?}");
    assert!(matches!(
        orders.cancel_order(id.clone()).await,
        Err(OrderError::Locked { .. })
    ));

    // Only the securing shop may mark it made, and only one step at a time
    let err = orders
        .update_pending_order_status(rival, id.clone(), OrderStatus::Made)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::NotAssigned { .. }), "{err:?}");
    let err = orders
        .update_pending_order_status(shop.clone(), id.clone(), OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Brewing,
            to: OrderStatus::Delivered
        }
    );
    let made = orders
        .update_pending_order_status(shop.clone(), id.clone(), OrderStatus::Made)
        .await
        .unwrap();
    assert_eq!(made.status, OrderStatus::Made);

    // Deliverer takes over
    let deliveries = orders.available_deliveries().await.unwrap();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].delivery_fee, 3.0);
    assert_eq!(deliveries[0].prepared_location, Some(kitchen()));

    orders.secure_delivery(deliverer.clone(), id.clone()).await.unwrap();
    let err = orders
        .secure_delivery(DelivererId::new("deliverer_kim"), id.clone())
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::AlreadySecured(id.clone()));
    assert!(orders.is_secured_by_deliverer(deliverer.clone(), id.clone()).await.unwrap());

    let err = orders
        .update_delivery_status(deliverer.clone(), id.clone(), OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }), "{err:?}");

    orders
        .update_delivery_status(deliverer.clone(), id.clone(), OrderStatus::PickedUp)
        .await
        .unwrap();
    let delivered = orders
        .update_delivery_status(deliverer.clone(), id.clone(), OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(orders.deliveries_by(deliverer).await.unwrap().len(), 1);

    // Customer rates the drinks
    let rating = orders
        .rate_order_item(customer.clone(), id.clone(), ItemId::new("item_1"), 4)
        .await
        .unwrap();
    assert_eq!(rating.rating, 4);
    orders
        .rate_order_item(customer.clone(), id.clone(), ItemId::new("item_1"), 5)
        .await
        .unwrap();
    assert!(matches!(
        orders
            .rate_order_item(CustomerId::new("ben"), id.clone(), ItemId::new("item_1"), 3)
            .await,
        Err(OrderError::NotOwner { .. })
    ));
    assert_eq!(
        orders
            .rate_order_item(customer.clone(), id.clone(), ItemId::new("item_2"), 6)
            .await,
        Err(OrderError::InvalidRating(6))
    );

    let ratings = orders.get_order_ratings(id.clone()).await.unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].rating, 5);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_customer_may_change_or_cancel_until_secured() {
    let system = seeded_system().await;
    let orders = &system.orders;

    let first = orders
        .submit_order(submission("ana", vec![decaf_americano()]))
        .await
        .unwrap();
    let mut later = submission("ana", vec![mocha_with_caramel()]);
    later.delivery_time = Utc::now() + chrono::Duration::hours(3);
    let second = orders.submit_order(later).await.unwrap();
    orders
        .submit_order(submission("ben", vec![decaf_americano()]))
        .await
        .unwrap();

    let history = orders.get_order_history(CustomerId::new("ana")).await.unwrap();
    let ids: Vec<_> = history.iter().map(|o| o.id.clone()).collect();
    assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);

    let err = orders
        .update_order(
            first.id.clone(),
            OrderUpdate {
                delivery_time: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::DeliveryTooSoon { .. }), "{err:?}");

    let moved = orders
        .update_order(
            first.id.clone(),
            OrderUpdate {
                delivery_location: Some(kitchen()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.delivery_location, kitchen());

    orders.cancel_order(first.id.clone()).await.unwrap();
    assert_eq!(
        orders.get_order(first.id.clone()).await,
        Err(OrderError::NotFound(first.id.clone()))
    );
    assert!(orders.get(first.id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_favorites_are_independent_of_orders() {
    let system = seeded_system().await;
    let customer = CustomerId::new("ana");

    let order = system
        .orders
        .submit_order(submission("ana", vec![mocha_with_caramel()]))
        .await
        .unwrap();
    let favorite_id = system
        .favorites
        .add_favorite(customer.clone(), "  Morning  ", order.items.clone())
        .await
        .unwrap();

    system.orders.cancel_order(order.id).await.unwrap();

    let favorite = system.favorites.get_favorite(favorite_id.clone()).await.unwrap();
    assert_eq!(favorite.name, "Morning");
    assert_eq!(favorite.items.len(), 1);

    let renamed = system
        .favorites
        .rename_favorite(favorite_id.clone(), "Weekday")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Weekday");
    assert_eq!(
        system.favorites.rename_favorite(favorite_id, "   ").await,
        Err(FavoriteError::BlankName)
    );

    assert_eq!(
        system.favorites.get_favorite_orders(customer).await.unwrap().len(),
        1
    );
    assert!(system
        .favorites
        .get_favorite_orders(CustomerId::new("ben"))
        .await
        .unwrap()
        .is_empty());

    system.shutdown().await.unwrap();
}
