//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the collection actors.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created first and receive their dependencies when they start
//! (`run(context)`). Only the Order actor has one:
//!
//! ```rust,ignore
//! impl Document for Order {
//!     type Context = StockLedger; // wraps the product collection's client
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**: closes the sender side of every channel
//! 2. **Actors detect closure**: `receiver.recv()` returns `None` once every sender,
//!    including the ones held in contexts, is gone
//! 3. **Await completion**: [`ShopSystem::shutdown`] joins every actor task
//!
//! Tracing is set up separately with [`setup_tracing`].

pub mod shop_system;
pub mod telemetry;

pub use shop_system::*;
pub use telemetry::*;
