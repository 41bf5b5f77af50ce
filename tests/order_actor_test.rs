use brew_order::clients::{CatalogClient, OrderClient};
use brew_order::config::FeeSchedule;
use brew_order::model::{
    CoffeeType, CustomerId, ItemId, Location, MilkType, OrderCreate, OrderItem, OrderStatus,
    Product, ProductAddition,
};
use brew_order::order_actor::{OrderContext, OrderError};
use chrono::Utc;
use resource_framework::mock::MockClient;
use resource_framework::FrameworkError;

/// Real Order actor with the catalog mocked out.
///
/// `Order::on_create` reads the enabled catalog (products, then additions), so each
/// submission that gets that far consumes one `list` expectation from each mock.
struct Harness {
    products: MockClient<Product>,
    additions: MockClient<ProductAddition>,
    orders: OrderClient,
    handle: tokio::task::JoinHandle<()>,
}

impl Harness {
    fn start() -> Self {
        let products = MockClient::<Product>::new();
        let additions = MockClient::<ProductAddition>::new();
        let context = OrderContext {
            catalog: CatalogClient::new(products.client(), additions.client()),
            min_lead_time: chrono::Duration::minutes(30),
        };

        let (actor, client) = brew_order::order_actor::new(8);
        let handle = tokio::spawn(actor.run(context));

        Self {
            products,
            additions,
            orders: OrderClient::new(client, FeeSchedule::default()),
            handle,
        }
    }

    fn expect_catalog(&mut self) {
        self.products.expect_list().return_ok(vec![
            Product::new("mocha", "Mocha", 5.0)
                .with_coffee_types([CoffeeType::Regular])
                .with_milk_types([MilkType::Regular, MilkType::Oat])
                .with_additions(["whipped-cream"]),
            Product::new("espresso", "Espresso", 3.0),
        ]);
        self.additions
            .expect_list()
            .return_ok(vec![ProductAddition::new("whipped-cream", "Whipped Cream", 0.3)]);
    }

    async fn stop(self) {
        self.products.verify();
        self.additions.verify();
        drop(self.orders);
        self.handle.await.unwrap();
    }
}

fn submission(items: Vec<OrderItem>) -> OrderCreate {
    OrderCreate {
        customer_id: CustomerId::new("ana"),
        delivery_time: Utc::now() + chrono::Duration::hours(1),
        delivery_location: Location::new("12 Elm St", "Springfield", "IL", "62704"),
        items,
    }
}

#[tokio::test]
async fn test_submission_refreshes_and_numbers_items() {
    let mut harness = Harness::start();
    harness.expect_catalog();

    let mut carted = OrderItem::new("mocha", CoffeeType::Regular, 5.0)
        .with_milk(MilkType::Oat)
        .with_additions(vec![ProductAddition::new("whipped-cream", "Whipped Cream", 0.3)]);
    carted.id = Some(ItemId::from(41));
    let items = vec![carted, OrderItem::new("espresso", CoffeeType::Decaf, 3.0)];

    let order = harness.orders.submit_order(submission(items)).await.unwrap();

    assert_eq!(order.status, OrderStatus::Received);
    assert_eq!(order.items[0].id, Some(ItemId::new("item_1")));
    assert_eq!(order.items[1].id, Some(ItemId::new("item_2")));
    assert!((order.total() - 8.3).abs() < 1e-9);
    assert!(order.shop_id.is_none());

    harness.stop().await;
}

#[tokio::test]
async fn test_submission_rejects_items_that_need_correction() {
    let mut harness = Harness::start();
    harness.expect_catalog();

    let items = vec![
        OrderItem::new("espresso", CoffeeType::Regular, 3.0).with_milk(MilkType::Oat),
        OrderItem::new("flat-white", CoffeeType::Regular, 4.0),
    ];
    let err = harness.orders.submit_order(submission(items)).await.unwrap_err();

    assert_eq!(
        err,
        OrderError::InvalidItems(vec![
            "Espresso no longer has a milk selection".to_string(),
            "Order item 2 is not available".to_string(),
        ])
    );
    assert!(harness.orders.get_order_history(CustomerId::new("ana")).await.unwrap().is_empty());

    harness.stop().await;
}

#[tokio::test]
async fn test_submission_fails_when_catalog_is_down() {
    let mut harness = Harness::start();
    harness
        .products
        .expect_list()
        .return_err(FrameworkError::ActorClosed);

    let items = vec![OrderItem::new("espresso", CoffeeType::Regular, 3.0)];
    let err = harness.orders.submit_order(submission(items)).await.unwrap_err();

    assert!(matches!(err, OrderError::CatalogUnavailable(_)), "{err:?}");

    harness.stop().await;
}

#[tokio::test]
async fn test_submission_checks_order_shape_before_reading_catalog() {
    let harness = Harness::start();

    let err = harness.orders.submit_order(submission(vec![])).await.unwrap_err();
    assert_eq!(err, OrderError::EmptyOrder);

    let mut rushed = submission(vec![OrderItem::new("espresso", CoffeeType::Regular, 3.0)]);
    rushed.delivery_time = Utc::now() + chrono::Duration::minutes(5);
    let err = harness.orders.submit_order(rushed).await.unwrap_err();
    assert!(matches!(err, OrderError::DeliveryTooSoon { .. }), "{err:?}");

    harness.stop().await;
}
