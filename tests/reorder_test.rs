use brew_order::cart::Cart;
use brew_order::clients::CatalogClient;
use brew_order::config::StorefrontConfig;
use brew_order::favorite_actor::FavoriteError;
use brew_order::lifecycle::{seed, StorefrontSystem};
use brew_order::model::{
    AdditionUpdate, CoffeeType, CustomerId, FavoriteId, ItemId, Location, MilkType, OrderCreate,
    OrderItem, Product, ProductAddition, ProductUpdate,
};
use brew_order::notice::{self, Notice};
use brew_order::polling::{ErrorCode, RetryPolicy};
use brew_order::reorder::{Reorder, ReorderError};
use chrono::Utc;
use resource_framework::mock::MockClient;
use resource_framework::FrameworkError;
use std::time::Duration;

const ISSUES_FOR: Duration = Duration::from_millis(8000);

async fn seeded_system() -> StorefrontSystem {
    let system = StorefrontSystem::new(StorefrontConfig::default());
    seed::seed_catalog(&system.catalog).await.unwrap();
    system
}

fn caramel() -> ProductAddition {
    ProductAddition::new("caramel-syrup", "Caramel Syrup", 0.5)
}

#[tokio::test]
async fn test_reorder_from_history_follows_current_catalog() {
    let system = seeded_system().await;
    let reorder = system.reorder();

    let order = system
        .orders
        .submit_order(OrderCreate {
            customer_id: CustomerId::new("ana"),
            delivery_time: Utc::now() + chrono::Duration::hours(1),
            delivery_location: Location::new("12 Elm St", "Springfield", "IL", "62704"),
            items: vec![
                OrderItem::new("mocha", CoffeeType::Regular, 5.0)
                    .with_milk(MilkType::Oat)
                    .with_additions(vec![caramel()]),
                OrderItem::new("cappuccino", CoffeeType::Decaf, 5.0).with_milk(MilkType::Oat),
            ],
        })
        .await
        .unwrap();

    // The catalog moves on after the order was placed
    system
        .catalog
        .update_product(
            "mocha".into(),
            ProductUpdate {
                allowed_milk_types: Some(vec![MilkType::Regular]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    system
        .catalog
        .update_product_addition(
            "caramel-syrup".into(),
            AdditionUpdate {
                price: Some(0.75),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    system
        .catalog
        .update_product(
            "cappuccino".into(),
            ProductUpdate {
                enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut cart = Cart::new();
    let outcome = reorder
        .reorder_order(&system.orders, &mut cart, order.id.clone())
        .await
        .unwrap();

    assert_eq!(
        outcome.issues,
        vec![
            "Mocha requires a valid milk selection - defaulting to Regular",
            "Order item 2 is not available",
        ]
    );
    assert_eq!(outcome.added, vec![ItemId::from(1)]);

    let item = cart.get(&ItemId::from(1)).unwrap();
    assert_eq!(item.milk_type, Some(MilkType::Regular));
    assert_eq!(item.additions.as_ref().unwrap()[0].price, 0.75);
    assert!((cart.total() - 5.75).abs() < 1e-9);

    let notice = outcome.notice(ISSUES_FOR).unwrap();
    assert!(notice.multiline);
    assert_eq!(notice.duration, Some(ISSUES_FOR));

    // History keeps what was actually ordered
    let stored = system.orders.get_order(order.id).await.unwrap();
    assert_eq!(stored.items.len(), 2);
    assert_eq!(stored.items[0].milk_type, Some(MilkType::Oat));
    assert_eq!(stored.items[0].additions.as_ref().unwrap()[0].price, 0.5);

    drop(reorder);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reorder_favorite_drops_stale_choices() {
    let system = seeded_system().await;
    let reorder = system.reorder();
    let favorite = system
        .favorites
        .add_favorite(
            CustomerId::new("ana"),
            "Autumn",
            vec![
                OrderItem::new("espresso", CoffeeType::Regular, 4.0).with_milk(MilkType::Oat),
                OrderItem::new("caramel-macchiato", CoffeeType::Regular, 5.0).with_additions(
                    vec![ProductAddition::new(
                        "pumpkin-spice-syrup",
                        "Pumpkin Spice Syrup",
                        0.75,
                    )],
                ),
            ],
        )
        .await
        .unwrap();

    let mut cart = Cart::new();
    cart.add(OrderItem::new("cappuccino", CoffeeType::Regular, 5.0).with_milk(MilkType::Regular));

    let outcome = reorder
        .reorder_favorite(&system.favorites, &mut cart, favorite.clone())
        .await
        .unwrap();

    assert_eq!(
        outcome.issues,
        vec![
            "Espresso no longer has a milk selection",
            "Caramel Macchiato no longer allows Pumpkin Spice Syrup.",
        ]
    );
    assert_eq!(outcome.added, vec![ItemId::from(2), ItemId::from(3)]);
    assert_eq!(cart.len(), 3);

    let espresso = cart.get(&ItemId::from(2)).unwrap();
    assert_eq!(espresso.milk_type, None);
    assert_eq!(espresso.base_price, 5.0);
    let macchiato = cart.get(&ItemId::from(3)).unwrap();
    assert_eq!(macchiato.additions, Some(vec![]));

    let saved = system.favorites.get_favorite(favorite).await.unwrap();
    assert_eq!(saved.items[0].milk_type, Some(MilkType::Oat));

    drop(reorder);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reorder_with_nothing_left_leaves_cart_alone() {
    let system = seeded_system().await;
    let reorder = system.reorder();
    let favorite = system
        .favorites
        .add_favorite(
            CustomerId::new("ana"),
            "Summer",
            vec![OrderItem::new("apple-cider", CoffeeType::Regular, 4.0)],
        )
        .await
        .unwrap();

    let mut cart = Cart::new();
    let err = reorder
        .reorder_favorite(&system.favorites, &mut cart, favorite)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ReorderError::NothingAvailable {
            issues: vec!["Order item 1 is not available".to_string()]
        }
    );
    let notices = err.notices(ISSUES_FOR);
    assert_eq!(notices.len(), 2);
    assert!(notices[0].multiline);
    assert_eq!(notices[1], Notice::acknowledge(notice::NOTHING_AVAILABLE));
    assert!(cart.is_empty());

    let missing = FavoriteId::new("favorite_9");
    let err = reorder
        .reorder_favorite(&system.favorites, &mut cart, missing.clone())
        .await
        .unwrap_err();
    assert_eq!(err, ReorderError::Favorite(FavoriteError::NotFound(missing)));
    assert_eq!(
        err.notices(ISSUES_FOR)[0].message,
        "Failed to load favorite: Favorite not found: favorite_9"
    );

    assert!(reorder.reorder_available().await);

    drop(reorder);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reorder_blocked_while_catalog_is_down() {
    let mut products = MockClient::<Product>::new();
    let additions = MockClient::<ProductAddition>::new();
    for _ in 0..3 {
        products
            .expect_list()
            .return_err(FrameworkError::ActorClosed);
    }

    let reorder = Reorder::new(
        CatalogClient::new(products.client(), additions.client()),
        RetryPolicy::new(1, Duration::ZERO),
    );
    let mut cart = Cart::new();
    let err = reorder
        .reorder_items(
            &mut cart,
            &[OrderItem::new("espresso", CoffeeType::Regular, 5.0)],
        )
        .await
        .unwrap_err();

    let ReorderError::CatalogUnavailable(cause) = &err else {
        panic!("expected catalog failure, got {err:?}");
    };
    assert_eq!(cause.error_code, ErrorCode::ServiceUnavailable);
    assert_eq!(err.notices(ISSUES_FOR), vec![Notice::catalog_unavailable()]);
    assert!(cart.is_empty());

    assert!(!reorder.reorder_available().await);
    products.verify();
    additions.verify();
}
