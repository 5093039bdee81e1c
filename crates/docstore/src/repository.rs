//! # Repository Trait
//!
//! Common interface for collection-specific clients: default `get`, `fetch`, `find`,
//! `delete` and `delete_many` built on top of a generic `CollectionClient`.

use crate::{CollectionClient, Document, Page, Query, StoreError};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard operations.
///
/// Implementors supply the inner client and a mapping from [`StoreError`] into their
/// own error type; everything else comes for free.
///
/// ```ignore
/// #[async_trait]
/// impl Repository<User> for UserClient {
///     type Error = UserError;
///
///     fn inner(&self) -> &CollectionClient<User> {
///         &self.inner
///     }
///
///     fn map_error(e: StoreError) -> Self::Error {
///         match e {
///             StoreError::NotFound(id) => UserError::NotFound(id),
///             other => UserError::ActorCommunicationError(other.to_string()),
///         }
///     }
/// }
///
/// // get(), fetch(), find(), delete() and delete_many() are now available.
/// let user = client.fetch(UserId(1)).await?;
/// ```
#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    /// The collection-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map store errors to the collection-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a document by id, `None` when absent.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch a document by id, mapping absence to the not-found error.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        let missing = StoreError::NotFound(id.to_string());
        match self.inner().get(id).await.map_err(Self::map_error)? {
            Some(doc) => Ok(doc),
            None => Err(Self::map_error(missing)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, query: Query) -> Result<Page<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(query).await.map_err(Self::map_error)
    }

    /// Delete a document by id, returning it.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Delete every listed document that exists, returning how many were removed.
    #[tracing::instrument(skip(self))]
    async fn delete_many(&self, ids: Vec<T::Id>) -> Result<usize, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete_many(ids).await.map_err(Self::map_error)
    }
}
