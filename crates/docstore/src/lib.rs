//! # Docstore
//!
//! An in-process document store built on the actor model. Each collection is a
//! [`CollectionActor`] that owns its documents and handles requests one at a time;
//! callers talk to it through a cheaply cloneable [`CollectionClient`].
//!
//! ## What a collection offers
//!
//! - Insert, get, update, delete, plus `update_many` and `delete_many`
//! - Filtered, multi-field sorted, paginated `find` and `count` ([`Query`], [`Filter`],
//!   [`SortSpec`], [`Pagination`])
//! - A unique index per collection ([`Document::unique_key`])
//! - Document actions: the conditional-update-and-return primitive. The precondition
//!   check and the mutation run inside one message, so no other request can slip in
//!   between them.
//!
//! ## Concurrency Model
//!
//! - Each collection runs in its own Tokio task
//! - Messages are processed **sequentially** within a collection, so single-document
//!   operations are atomic without locks
//! - Different collections run in parallel
//! - Hooks run on a staged copy; failures leave the stored document untouched
//!
//! ## Quick Start
//!
//! ```rust
//! use async_trait::async_trait;
//! use docstore::{CollectionActor, Document, FieldValue, Filter, Query};
//!
//! #[derive(Clone, Debug)]
//! struct Counter {
//!     id: u32,
//!     name: String,
//!     value: u32,
//! }
//!
//! #[derive(Debug)] struct CounterCreate { name: String }
//! #[derive(Debug, Clone)] struct CounterUpdate { name: Option<String> }
//! #[derive(Debug)] enum CounterAction { Take(u32) }
//! #[derive(Debug, thiserror::Error)] #[error("counter exhausted")] struct Exhausted;
//!
//! #[async_trait]
//! impl Document for Counter {
//!     const COLLECTION: &'static str = "counters";
//!     type Id = u32;
//!     type Create = CounterCreate;
//!     type Update = CounterUpdate;
//!     type Action = CounterAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = Exhausted;
//!
//!     fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, Exhausted> {
//!         Ok(Self { id, name: params.name, value: 10 })
//!     }
//!
//!     fn field(&self, name: &str) -> Option<FieldValue> {
//!         match name {
//!             "name" => Some(self.name.as_str().into()),
//!             "value" => Some(self.value.into()),
//!             _ => None,
//!         }
//!     }
//!
//!     async fn on_update(&mut self, update: CounterUpdate, _: &()) -> Result<(), Exhausted> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: CounterAction, _: &()) -> Result<u32, Exhausted> {
//!         match action {
//!             CounterAction::Take(n) if self.value >= n => {
//!                 self.value -= n;
//!                 Ok(self.value)
//!             }
//!             CounterAction::Take(_) => Err(Exhausted),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = CollectionActor::<Counter>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let counter = client.create(CounterCreate { name: "a".into() }).await.unwrap();
//!     assert_eq!(client.perform_action(counter.id, CounterAction::Take(4)).await.unwrap(), 6);
//!     assert!(client.perform_action(counter.id, CounterAction::Take(7)).await.is_err());
//!
//!     let page = client.find(Query::new(Filter::new().eq("value", 6u32))).await.unwrap();
//!     assert_eq!(page.total_count, 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts, not when it is built. All actors
//! are created first, then each is spawned with the clients it needs:
//!
//! ```rust,ignore
//! let (product_actor, products) = CollectionActor::<Product>::new(32);
//! let (order_actor, orders) = CollectionActor::<Order>::new(32);
//!
//! tokio::spawn(product_actor.run(()));
//! // Orders reserve stock from their `on_create` hook.
//! tokio::spawn(order_actor.run(StockLedger::new(products.clone())));
//! ```
//!
//! Shutdown follows from dropping every client: the actor's `recv()` returns `None`
//! and the loop exits. Clients held in another actor's context keep that collection
//! alive, so the dependency graph must stay acyclic.
//!
//! ## Testing
//!
//! [`mock::MockCollection`] hands out a real client answered from canned
//! expectations. See the [`mock`] module for the testing patterns.

pub mod client;
pub mod collection;
pub mod document;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod repository;

pub use client::CollectionClient;
pub use collection::CollectionActor;
pub use document::Document;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use query::{Condition, FieldValue, Filter, Page, Pagination, Query, SortDirection, SortSpec};
pub use repository::Repository;
