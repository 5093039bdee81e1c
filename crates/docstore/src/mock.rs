//! # Mock Collections & Testing Guide
//!
//! `MockCollection<T>` hands out a real [`CollectionClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to test
//! clients and documents that depend on other collections without spawning them.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockCollection | Real Actor |
//! |---------|----------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | Fully deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real documents |
//! | **Use Case** | Logic *around* the client | The actor itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Testing Strategies
//!
//! * **Pure mock**: wrap `mock.client()` in a domain client and assert on its results.
//! * **Single actor**: spawn a real `CollectionActor` with `()` context.
//! * **Actor with mocked dependencies**: spawn the real actor under test and pass
//!   clients built from mocks as its context. The order workflow tests in the
//!   `shop-admin` crate use this to drive order creation against a mocked product
//!   collection.
//! * **Full system**: start every actor and exercise end-to-end flows.
//!
//! ## Example
//!
//! ```ignore
//! let mut products = MockCollection::<Product>::new();
//! products
//!     .expect_action(ProductId(1))
//!     .return_ok(ProductActionResult::ReserveStock(product));
//! products
//!     .expect_get(ProductId(2))
//!     .return_err(StoreError::ActorClosed);
//!
//! let client = products.client();
//! // exercise code that uses the client ...
//! products.verify(); // every expectation was consumed
//! ```
//!
//! Expectations are consumed in order. A request whose kind or id differs from the
//! next expectation panics the mock task, which drops the reply channel and surfaces
//! as [`StoreError::ActorDropped`] at the caller.
//!
//! ## Raw Receivers
//!
//! [`create_mock_client`] returns a client and the receiving end of its channel, for
//! tests that want to inspect each request and answer it by hand with
//! [`expect_create`], [`expect_get`] or [`expect_action`].

use crate::client::CollectionClient;
use crate::document::Document;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::query::Page;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Reply<T: Document> {
    Get(Result<Option<T>, StoreError>),
    Create(Result<T, StoreError>),
    Find(Result<Page<T>, StoreError>),
    Update(Result<T, StoreError>),
    Delete(Result<T, StoreError>),
    Action(Result<T::ActionResult, StoreError>),
}

/// An expected request: its id (when the request targets one) and the canned reply.
struct Expectation<T: Document> {
    id: Option<T::Id>,
    reply: Reply<T>,
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock collection with expectation tracking for fluent testing.
pub struct MockCollection<T: Document> {
    client: CollectionClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MockCollection<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                let Some(Expectation { id: expected, reply }) = next else {
                    panic!("Unexpected request on {} mock: no expectations left", T::COLLECTION);
                };
                let check_id = |actual: &T::Id| {
                    if let Some(expected) = &expected {
                        assert_eq!(expected, actual, "{} mock: unexpected id", T::COLLECTION);
                    }
                };

                match (request, reply) {
                    (StoreRequest::Get { id, respond_to }, Reply::Get(response)) => {
                        check_id(&id);
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Create { respond_to, .. }, Reply::Create(response)) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Find { respond_to, .. }, Reply::Find(response)) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Update { id, respond_to, .. }, Reply::Update(response)) => {
                        check_id(&id);
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Delete { id, respond_to }, Reply::Delete(response)) => {
                        check_id(&id);
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Action { id, respond_to, .. }, Reply::Action(response)) => {
                        check_id(&id);
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch on {} mock", T::COLLECTION);
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    fn expect<R>(&mut self, id: Option<T::Id>, wrap: fn(Result<R, StoreError>) -> Reply<T>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` of `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.expect(Some(id), Reply::Get)
    }

    /// Expects a `create` with any payload.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.expect(None, Reply::Create)
    }

    /// Expects a `find` with any query.
    pub fn expect_find(&mut self) -> ExpectationBuilder<T, Page<T>> {
        self.expect(None, Reply::Find)
    }

    /// Expects an `update` of `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.expect(Some(id), Reply::Update)
    }

    /// Expects a `delete` of `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.expect(Some(id), Reply::Delete)
    }

    /// Expects an action on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.expect(Some(id), Reply::Action)
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: Document, R> {
    id: Option<T::Id>,
    wrap: fn(Result<R, StoreError>) -> Reply<T>,
    expectations: Queue<T>,
}

impl<T: Document, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let reply = (self.wrap)(response);
        self.expectations.lock().unwrap().push_back(Expectation {
            id: self.id,
            reply,
        });
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: read each request with one of the `expect_*` helpers
/// below, assert on it, and answer through the returned responder.
pub fn create_mock_client<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Returns the next request if it is a `Create`.
pub async fn expect_create<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a `Get`.
pub async fn expect_get<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an `Action`.
pub async fn expect_action<T: Document>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
