//! # Poller
//!
//! [`poll_after_data`] turns a single-shot fetch into a live stream of values. One task per
//! session runs the loop:
//!
//! ```text
//! fetch ──► evaluate stop predicate ──► broadcast ──► sleep(interval) ──► fetch ...
//! ```
//!
//! The interval starts when a fetch completes, so calls never overlap. A session ends when
//! the stop predicate matches, when [`PollSession::cancel`] is called, when every
//! subscriber is gone, or after the first failed fetch. Once it ends no further fetch
//! starts; a fetch already in flight finishes but its value is dropped.

use crate::config::StorefrontConfig;
use std::fmt::{self, Display};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2500);
pub const FAST_POLL_INTERVAL: Duration = Duration::from_millis(1000);
const DEFAULT_CAPACITY: usize = 16;

/// Called with each fetched value and its zero-based attempt index.
pub type StopPredicate<T> = Arc<dyn Fn(&T, u32) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct PollConfig<T> {
    pub interval: Duration,
    /// `None` polls until cancelled.
    pub stop: Option<StopPredicate<T>>,
    /// Deliver the value that matched `stop` before completing.
    pub inclusive: bool,
    /// Values buffered per subscriber before it starts lagging.
    pub capacity: usize,
    pub label: &'static str,
}

impl<T> PollConfig<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            stop: None,
            inclusive: true,
            capacity: DEFAULT_CAPACITY,
            label: "poll",
        }
    }

    /// The standard cadence from `config`.
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.poll_interval()).with_capacity(config.poll_capacity)
    }

    /// The tighter cadence used while waiting on a flag.
    pub fn fast(config: &StorefrontConfig) -> Self {
        Self::new(config.fast_poll_interval()).with_capacity(config.poll_capacity)
    }

    pub fn stop_when(mut self, predicate: impl Fn(&T, u32) -> bool + Send + Sync + 'static) -> Self {
        self.stop = Some(Arc::new(predicate));
        self
    }

    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn labeled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

impl<T> Default for PollConfig<T> {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

/// Why a poll session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Predicate,
    Cancelled,
    NoSubscribers,
    Failed,
}

impl Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            StopReason::Predicate => "stop condition met",
            StopReason::Cancelled => "cancelled",
            StopReason::NoSubscribers => "no subscribers",
            StopReason::Failed => "fetch failed",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone)]
enum PollEvent<T, E> {
    Value(T),
    Failed(E),
    Completed,
}

/// Handle on a running poll. Dropping it does not stop the poll; dropping every
/// [`PollReceiver`] does.
pub struct PollSession<T, E> {
    sender: broadcast::Sender<PollEvent<T, E>>,
    token: CancellationToken,
    state: watch::Receiver<Option<StopReason>>,
}

impl<T: Clone, E: Clone> PollSession<T, E> {
    /// A new subscriber sees values fetched from now on. Subscribing to a finished session
    /// yields a receiver that is already exhausted.
    pub fn subscribe(&self) -> PollReceiver<T, E> {
        PollReceiver {
            inner: self.sender.subscribe(),
            done: self.token.is_cancelled(),
        }
    }

    /// Stops the poll. No fetch starts after this returns.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// The reason the session ended, once it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        *self.state.borrow()
    }

    /// Waits for the session to end.
    pub async fn finished(&self) -> Option<StopReason> {
        let mut state = self.state.clone();
        let reason = state.wait_for(Option::is_some).await.ok()?;
        *reason
    }
}

/// Receives the values of one poll session in fetch order.
pub struct PollReceiver<T, E> {
    inner: broadcast::Receiver<PollEvent<T, E>>,
    done: bool,
}

impl<T: Clone, E: Clone> PollReceiver<T, E> {
    /// The next value, the terminal error, or `None` once the session has ended.
    ///
    /// A subscriber that falls more than `capacity` values behind skips the oldest ones.
    pub async fn next(&mut self) -> Option<Result<T, E>> {
        if self.done {
            return None;
        }
        loop {
            match self.inner.recv().await {
                Ok(PollEvent::Value(value)) => return Some(Ok(value)),
                Ok(PollEvent::Failed(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Ok(PollEvent::Completed) | Err(broadcast::error::RecvError::Closed) => {
                    self.done = true;
                    return None;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Poll subscriber lagged");
                }
            }
        }
    }

    /// Drains the receiver. Stops at the terminal error, if any.
    pub async fn collect(mut self) -> Vec<Result<T, E>> {
        let mut values = Vec::new();
        while let Some(value) = self.next().await {
            values.push(value);
        }
        values
    }
}

/// Starts polling `fetch` on a background task.
///
/// Returns the session handle and a first subscriber; the first fetch starts immediately.
/// Must be called inside a Tokio runtime.
pub fn poll_after_data<T, E, F, Fut>(
    fetch: F,
    config: PollConfig<T>,
) -> (PollSession<T, E>, PollReceiver<T, E>)
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Display + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let (sender, receiver) = broadcast::channel(config.capacity.max(1));
    let (state_tx, state_rx) = watch::channel(None);
    let token = CancellationToken::new();

    let span = info_span!("poll", label = config.label);
    tokio::spawn(
        run(fetch, config, sender.clone(), token.clone(), state_tx).instrument(span),
    );

    let session = PollSession {
        sender,
        token,
        state: state_rx,
    };
    let receiver = PollReceiver {
        inner: receiver,
        done: false,
    };
    (session, receiver)
}

async fn run<T, E, F, Fut>(
    fetch: F,
    config: PollConfig<T>,
    sender: broadcast::Sender<PollEvent<T, E>>,
    token: CancellationToken,
    state: watch::Sender<Option<StopReason>>,
) where
    T: Clone + Send + Sync + 'static,
    E: Clone + Display + Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    info!(interval_ms = config.interval.as_millis() as u64, "Polling started");
    let mut fetches: u32 = 0;

    let reason = loop {
        if token.is_cancelled() {
            break StopReason::Cancelled;
        }
        if sender.receiver_count() == 0 {
            break StopReason::NoSubscribers;
        }

        let result = fetch().await;
        let attempt = fetches;
        fetches += 1;
        if token.is_cancelled() {
            debug!(attempt, "Discarding value fetched after cancel");
            break StopReason::Cancelled;
        }

        match result {
            Ok(value) => {
                let stop = config
                    .stop
                    .as_ref()
                    .is_some_and(|predicate| predicate(&value, attempt));
                debug!(attempt, stop, "Fetched");
                if (!stop || config.inclusive) && sender.send(PollEvent::Value(value)).is_err() {
                    break StopReason::NoSubscribers;
                }
                if stop {
                    break StopReason::Predicate;
                }
            }
            Err(e) => {
                warn!(attempt, error = %e, "Fetch failed");
                let _ = sender.send(PollEvent::Failed(e));
                break StopReason::Failed;
            }
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => break StopReason::Cancelled,
            _ = tokio::time::sleep(config.interval) => {}
        }
    };

    token.cancel();
    let _ = state.send(Some(reason));
    let _ = sender.send(PollEvent::Completed);
    info!(%reason, fetches, "Polling stopped");
}
