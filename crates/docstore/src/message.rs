//! # Store Requests
//!
//! The messages a [`CollectionClient`](crate::CollectionClient) sends to its actor.

use crate::document::Document;
use crate::error::StoreError;
use crate::query::{Filter, Page, Query};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by collection actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to a collection actor.
///
/// The single-document variants (`Create`, `Get`, `Update`, `Delete`, `Action`) map to
/// the document lifecycle; `Find`, `Count`, `UpdateMany` and `DeleteMany` work over a
/// filter or an id set. Every variant is handled to completion before the next message
/// is read, which is what makes each single-document operation atomic.
#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        query: Query,
        respond_to: Response<Page<T>>,
    },
    Count {
        filter: Filter,
        respond_to: Response<usize>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    UpdateMany {
        filter: Filter,
        update: T::Update,
        respond_to: Response<usize>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    DeleteMany {
        ids: Vec<T::Id>,
        respond_to: Response<usize>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
