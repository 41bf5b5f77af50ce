//! # Tracing Setup
//!
//! Structured logging for every actor and poll session, filtered by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run            # lifecycle events only
//! RUST_LOG=debug cargo run           # request payloads and poll ticks
//! RUST_LOG=brew_order=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` the demo prints lines such as:
//!
//! ```text
//! INFO Actor started entity_type="Order"
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Action ok entity_type="Order" id=order_1
//! INFO Poll stopped order_id=order_1 attempts=4 reason="stop condition"
//! ```

/// Installs a compact `fmt` subscriber driven by `RUST_LOG`.
///
/// Module paths are hidden (`with_target(false)`); actors log an `entity_type` field instead.
/// Calling this more than once is harmless: later calls leave the first subscriber in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
