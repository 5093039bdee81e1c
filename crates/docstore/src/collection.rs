//! # Collection Actor
//!
//! The server half of a collection: owns the documents and processes requests one
//! at a time.

use crate::client::CollectionClient;
use crate::document::Document;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::query::{Filter, Page, Query};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages one collection of documents.
///
/// # Architecture Note
/// This struct owns the state (`store`) and the receiver end of the channel. Each
/// collection processes its own messages *sequentially*, so the store needs no
/// `Mutex`: a conditional action checks its precondition and mutates the document
/// without any other request observing the state in between.
///
/// # Usage Pattern
///
/// 1.  **Create**: `CollectionActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// # Implementation Details
///
/// Documents live in a `BTreeMap` keyed by id, so iteration follows insertion order
/// (ids come from a monotonically increasing `u32` counter). Updates and actions are
/// applied to a staged clone and committed only on success.
///
/// ## Operations
///
/// * **Create**: next id, `from_create_params`, unique index check, `on_create`, insert.
///   Returns the stored document.
/// * **Get**: clone of the document, or `None`.
/// * **Find**: filter, stable multi-field sort, page window; returns a [`Page`].
/// * **Count**: number of documents matching a filter.
/// * **Update**: stage, `on_update`, unique index check, commit. Returns the new state.
/// * **UpdateMany**: **Update** applied to every matching document; documents whose
///   update fails are skipped. Returns how many changed.
/// * **Delete**: `on_delete`, remove. Returns the removed document.
/// * **DeleteMany**: **Delete** for each id that exists. Returns how many were removed.
/// * **Action**: stage, `handle_action`, commit on `Ok`. Returns the action result.
pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: Document> CollectionActor<T> {
    /// Creates a new `CollectionActor` and its associated `CollectionClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, CollectionClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// The `context` is handed to every document hook.
    pub async fn run(mut self, context: T::Context) {
        let collection = T::COLLECTION;
        info!(collection, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(collection, ?params, "Create");
                    let _ = respond_to.send(self.create(params, &context).await);
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(collection, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Find { query, respond_to } => {
                    let page = self.find(&query);
                    debug!(collection, ?query, total = page.total_count, "Find");
                    let _ = respond_to.send(Ok(page));
                }
                StoreRequest::Count { filter, respond_to } => {
                    let count = self.count(&filter);
                    debug!(collection, ?filter, count, "Count");
                    let _ = respond_to.send(Ok(count));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(collection, %id, ?update, "Update");
                    let _ = respond_to.send(self.update(id, update, &context).await);
                }
                StoreRequest::UpdateMany {
                    filter,
                    update,
                    respond_to,
                } => {
                    debug!(collection, ?filter, ?update, "UpdateMany");
                    let modified = self.update_many(&filter, update, &context).await;
                    info!(collection, modified, "Updated many");
                    let _ = respond_to.send(Ok(modified));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(collection, %id, "Delete");
                    let _ = respond_to.send(self.delete(id, &context).await);
                }
                StoreRequest::DeleteMany { ids, respond_to } => {
                    debug!(collection, count = ids.len(), "DeleteMany");
                    let mut removed = 0;
                    for id in ids {
                        if self.store.contains_key(&id) && self.delete(id, &context).await.is_ok() {
                            removed += 1;
                        }
                    }
                    info!(collection, removed, size = self.store.len(), "Deleted many");
                    let _ = respond_to.send(Ok(removed));
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(collection, %id, ?action, "Action");
                    let _ = respond_to.send(self.action(id, action, &context).await);
                }
            }
        }

        info!(collection, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T, StoreError> {
        let collection = T::COLLECTION;
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(collection, error = %e, "Create failed");
            StoreError::document(e)
        })?;
        self.check_unique(&id, &item)?;
        if let Err(e) = item.on_create(context).await {
            warn!(collection, %id, error = %e, "on_create failed");
            return Err(StoreError::document(e));
        }

        self.store.insert(id.clone(), item.clone());
        info!(collection, %id, size = self.store.len(), "Created");
        Ok(item)
    }

    fn find(&self, query: &Query) -> Page<T> {
        query.apply(self.store.values())
    }

    fn count(&self, filter: &Filter) -> usize {
        self.store.values().filter(|doc| filter.matches(*doc)).count()
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, StoreError> {
        let collection = T::COLLECTION;
        let Some(current) = self.store.get(&id) else {
            warn!(collection, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };

        let mut staged = current.clone();
        if let Err(e) = staged.on_update(update, context).await {
            warn!(collection, %id, error = %e, "Update failed");
            return Err(StoreError::document(e));
        }
        self.check_unique(&id, &staged)?;

        self.store.insert(id.clone(), staged.clone());
        info!(collection, %id, "Updated");
        Ok(staged)
    }

    async fn update_many(
        &mut self,
        filter: &Filter,
        update: T::Update,
        context: &T::Context,
    ) -> usize {
        let ids: Vec<T::Id> = self
            .store
            .iter()
            .filter(|(_, doc)| filter.matches(*doc))
            .map(|(id, _)| id.clone())
            .collect();

        let mut modified = 0;
        for id in ids {
            if self.update(id, update.clone(), context).await.is_ok() {
                modified += 1;
            }
        }
        modified
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<T, StoreError> {
        let collection = T::COLLECTION;
        let Some(item) = self.store.get(&id) else {
            warn!(collection, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };

        if let Err(e) = item.on_delete(context).await {
            warn!(collection, %id, error = %e, "on_delete failed");
            return Err(StoreError::document(e));
        }

        let removed = self
            .store
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        info!(collection, %id, size = self.store.len(), "Deleted");
        Ok(removed)
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, StoreError> {
        let collection = T::COLLECTION;
        let Some(current) = self.store.get(&id) else {
            warn!(collection, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };

        let mut staged = current.clone();
        match staged.handle_action(action, context).await {
            Ok(result) => {
                self.store.insert(id.clone(), staged);
                info!(collection, %id, "Action ok");
                Ok(result)
            }
            Err(e) => {
                warn!(collection, %id, error = %e, "Action failed");
                Err(StoreError::document(e))
            }
        }
    }

    /// Rejects `item` when another document already holds its unique key.
    fn check_unique(&self, id: &T::Id, item: &T) -> Result<(), StoreError> {
        let Some((field, key)) = item.unique_key() else {
            return Ok(());
        };
        let taken = self.store.iter().any(|(other_id, other)| {
            other_id != id && other.unique_key().is_some_and(|(_, other_key)| other_key == key)
        });
        if taken {
            warn!(collection = T::COLLECTION, field, value = %key, "Duplicate key");
            return Err(StoreError::Duplicate {
                field,
                value: key.to_string(),
            });
        }
        Ok(())
    }
}
