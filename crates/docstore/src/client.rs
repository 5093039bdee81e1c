//! # Collection Client
//!
//! The handle used to talk to a collection actor.

use crate::document::Document;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::query::{Filter, Page, Query};
use tokio::sync::{mpsc, oneshot};

/// A type-safe, cheaply cloneable handle to a `CollectionActor<T>`.
///
/// Requests travel over a Tokio mpsc channel and replies come back on a oneshot
/// channel. A closed request channel surfaces as [`StoreError::ActorClosed`], a reply
/// channel dropped without an answer as [`StoreError::ActorDropped`].
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Document> Clone for CollectionClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R: Send>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T> + Send,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn find(&self, query: Query) -> Result<Page<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Find { query, respond_to })
            .await
    }

    pub async fn count(&self, filter: Filter) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::Count { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn update_many(&self, filter: Filter, update: T::Update) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::UpdateMany {
            filter,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn delete_many(&self, ids: Vec<T::Id>) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::DeleteMany { ids, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
