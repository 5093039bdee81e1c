//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter driven by
//! `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per stored change
//! RUST_LOG=debug cargo run     # request payloads and query details
//! ```
//!
//! With `RUST_LOG=info`, placing an order for two products reads:
//!
//! ```text
//! INFO Action ok collection="products" id=product_1
//! INFO Action ok collection="products" id=product_2
//! INFO Stock reserved order=order_1 items=2
//! INFO Created collection="orders" id=order_1 size=1
//! INFO place_order{user=user_1 items=2}: Order placed order=order_1
//! INFO place_order{user=user_1 items=2}: Order confirmation from=no-reply@shop.local to="alice@example.com" items=2 total=130.0
//! ```
//!
//! Every line from the collection actors carries a `collection` field, so
//! `RUST_LOG` plus a grep on `collection="orders"` follows one collection.

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
