//! # Clients
//!
//! Type-safe wrappers around each collection's `CollectionClient`. Each implements
//! [`Repository`](docstore::Repository) for the standard reads and deletes and adds
//! its collection's operations on top.

pub mod order_client;
pub mod product_client;
pub mod reference_client;
pub mod review_client;
pub mod stock_ledger;
pub mod user_client;

pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use reference_client::{CityClient, PaymentTypeClient, ProductTypeClient};
pub use review_client::ReviewClient;
pub use stock_ledger::{MoveFailure, StockLedger};
pub use user_client::UserClient;
