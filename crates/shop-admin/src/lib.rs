//! # Shop Admin Library
//!
//! The administrative backend of an online shop on top of the `docstore` actor
//! collections: users, a product catalog with stock counters, orders, reviews and
//! reference data.
//!
//! - **[model]**: plain data and typed ids
//! - **`*_actor`**: one [`Document`](docstore::Document) implementation and error
//!   enum per collection
//! - **[clients]**: typed clients, including the order placement and cancellation
//!   workflows and the [`StockLedger`](clients::StockLedger)
//! - **[lifecycle]**: [`ShopSystem`](lifecycle::ShopSystem) and tracing setup
//! - **[response]**: the `ApiResponse` envelope callers receive
//!
//! The library is exposed for the binary and for integration testing.

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod order_actor;
pub mod product_actor;
pub mod reference_actor;
pub mod response;
pub mod review_actor;
pub mod user_actor;
