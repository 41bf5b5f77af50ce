//! # Polling
//!
//! Three primitives that call sites assemble as needed:
//!
//! - [`poller`]: repeat a fetch with a delay and broadcast each value
//! - [`retry`]: re-run a fetch after transient failures
//! - [`normalize`]: turn repository errors into a [`ServiceError`]
//!
//! ```rust,no_run
//! # use brew_order::clients::OrderClient;
//! # use brew_order::model::{OrderId, OrderStatus};
//! # use brew_order::polling::{poll_after_data, PollConfig, RetryPolicy, ServiceError};
//! # async fn track(orders: OrderClient, id: OrderId) {
//! let fetch = RetryPolicy::default().retrying(move || {
//!     let (orders, id) = (orders.clone(), id.clone());
//!     async move { orders.get_order(id).await.map_err(ServiceError::from) }
//! });
//! let config = PollConfig::default().stop_when(|order: &brew_order::model::Order, _| {
//!     order.status == OrderStatus::Delivered
//! });
//! let (_session, mut updates) = poll_after_data(fetch, config);
//! while let Some(update) = updates.next().await {
//!     println!("{:?}", update.map(|o| o.status));
//! }
//! # }
//! ```

pub mod normalize;
pub mod poller;
pub mod retry;

pub use normalize::{normalize, ErrorCode, ServiceError};
pub use poller::{
    poll_after_data, PollConfig, PollReceiver, PollSession, StopPredicate, StopReason,
    DEFAULT_POLL_INTERVAL, FAST_POLL_INTERVAL,
};
pub use retry::{BoxedFetch, RetryPolicy, Retryable, DEFAULT_MAX_RETRIES};
