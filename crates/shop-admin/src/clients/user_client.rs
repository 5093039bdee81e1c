//! # User Client
//!
//! Provides a high‑level API for interacting with the `User` actor.
//! It wraps a `CollectionClient<User>` and exposes domain‑specific methods.
use crate::model::{ProductId, User, UserCreate, UserId, UserListParams, UserUpdate};
use crate::user_actor::{UserAction, UserError};
use docstore::{CollectionClient, Filter, Page, Query, Repository, StoreError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: CollectionClient<User>,
    page_size: u32,
}

impl UserClient {
    pub fn new(inner: CollectionClient<User>, page_size: u32) -> Self {
        Self { inner, page_size }
    }
}

#[async_trait]
impl Repository<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &CollectionClient<User> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        UserError::from(e)
    }
}

impl UserClient {
    /// Registers a user. The email must not be in use, ignoring case.
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    pub async fn user_details(&self, id: UserId) -> Result<User, UserError> {
        self.fetch(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, params: &UserListParams) -> Result<Page<User>, UserError> {
        debug!("Sending request");
        let filter = Filter::new()
            .one_of("status", params.statuses.iter().map(|status| status.code()))
            .search(&["email"], params.list.search_text());
        let query = Query::new(filter)
            .sorted(params.list.sort())
            .paginate(params.list.pagination(self.page_size));
        Ok(self.inner.find(query).await?)
    }

    #[instrument(skip(self))]
    pub async fn like(&self, id: UserId, product: ProductId) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, UserAction::LikeProduct(product))
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn unlike(&self, id: UserId, product: ProductId) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, UserAction::UnlikeProduct(product))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore::mock::MockCollection;

    #[tokio::test]
    async fn test_duplicate_email_maps_to_already_exists() {
        let mut users = MockCollection::<User>::new();
        users.expect_create().return_err(StoreError::Duplicate {
            field: "email",
            value: "alice@example.com".into(),
        });
        let client = UserClient::new(users.client(), 10);

        let result = client
            .create_user(UserCreate::new("Alice@example.com", "Alice", "Smith"))
            .await;
        assert_eq!(
            result,
            Err(UserError::AlreadyExists("alice@example.com".into()))
        );
        users.verify();
    }

    #[tokio::test]
    async fn test_user_details_not_found() {
        let mut users = MockCollection::<User>::new();
        users.expect_get(UserId(9)).return_ok(None);
        let client = UserClient::new(users.client(), 10);

        assert_eq!(
            client.user_details(UserId(9)).await,
            Err(UserError::NotFound("user_9".into()))
        );
        users.verify();
    }
}
