//! # Document Trait
//!
//! Defines the contract a type must satisfy to be stored in a
//! [`CollectionActor`](crate::CollectionActor).

use crate::query::FieldValue;
use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any stored document must implement to be managed by a `CollectionActor`.
///
/// # Architecture Note
/// Every collection (users, products, orders, ...) satisfies the same contract, so the
/// actor loop, the client, the query engine and the mocks are written once and reused
/// for all of them.
///
/// # Async & Context
/// The hooks are `#[async_trait]` so they can call other collections. The `Context`
/// associated type is injected into every hook when the actor starts (`run(context)`),
/// which lets dependencies be wired after all actors exist.
///
/// # Atomicity
/// Hooks always run against a staged copy of the document. The copy only replaces the
/// stored document when the hook returns `Ok`, so a failing update or action leaves the
/// collection exactly as it was.
#[async_trait]
pub trait Document: Clone + Send + Sync + 'static {
    /// Collection name used in log fields and error messages (e.g. `"products"`).
    const COLLECTION: &'static str;

    /// Identifier type. Ordered so collections iterate in insertion order, and
    /// convertible from `u32` for automatic id generation.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new document.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing document. Cloned once per document
    /// by `update_many`.
    type Update: Clone + Send + Sync + Debug;

    /// Document-specific operations (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into the actor at `run()`. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum per collection.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the full document from the generated id and the payload.
    /// Called before the unique index check and `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Value of a named field, as seen by filters and sort expressions.
    /// Unknown field names return `None`.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// The unique index entry for this document, if the collection has one.
    fn unique_key(&self) -> Option<(&'static str, FieldValue)> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the document is stored.
    /// Returning an error aborts the insert.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update to the (staged) document.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a document-specific action. This is the conditional-update-and-return
    /// primitive: check the precondition, mutate, and return the result in one step.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
