//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `CollectionClient<Product>` and coordinates with the user, review and
//! product type collections for likes, ratings and type names.
use crate::clients::{ProductTypeClient, ReviewClient, UserClient};
use crate::model::{
    Product, ProductCreate, ProductId, ProductListParams, ProductSummary, ProductTypeId,
    ProductUpdate, UserId,
};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docstore::{CollectionClient, Filter, Page, Pagination, Query, Repository, StoreError};
use tracing::{debug, error, info, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: CollectionClient<Product>,
    users: UserClient,
    reviews: ReviewClient,
    product_types: ProductTypeClient,
    page_size: u32,
}

impl ProductClient {
    pub fn new(
        inner: CollectionClient<Product>,
        users: UserClient,
        reviews: ReviewClient,
        product_types: ProductTypeClient,
        page_size: u32,
    ) -> Self {
        Self {
            inner,
            users,
            reviews,
            product_types,
            page_size,
        }
    }
}

#[async_trait]
impl Repository<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &CollectionClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        ProductError::from(e)
    }
}

impl ProductClient {
    /// Adds a product to the catalog. The slug must be unused.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    pub async fn product_details(&self, id: ProductId) -> Result<Product, ProductError> {
        self.fetch(id).await
    }

    /// Lists the catalog with each product's type name and average review rating.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        params: &ProductListParams,
    ) -> Result<Page<ProductSummary>, ProductError> {
        debug!("Sending request");
        let filter = Filter::new()
            .one_of("type", params.product_types.iter().copied())
            .search(&["name"], params.list.search_text());
        let pagination = if params.all {
            Pagination::All
        } else {
            params.list.pagination(self.page_size)
        };
        let query = Query::new(filter)
            .sorted(params.list.sort())
            .paginate(pagination);
        let page = self.inner.find(query).await?;

        let ids: Vec<ProductId> = page.items.iter().map(|product| product.id).collect();
        let ratings = self
            .reviews
            .average_ratings(&ids)
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;

        let mut type_ids: Vec<ProductTypeId> =
            page.items.iter().map(|product| product.product_type).collect();
        type_ids.sort();
        type_ids.dedup();
        let type_names = self
            .product_types
            .names(&type_ids)
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;

        Ok(page.map(|product| {
            let rating = ratings.get(&product.id).copied().unwrap_or(0.0);
            let type_name = type_names.get(&product.product_type).cloned();
            ProductSummary::new(product, type_name, rating)
        }))
    }

    /// Records that `user` likes `product` on both documents.
    #[instrument(skip(self))]
    pub async fn like_product(&self, product: ProductId, user: UserId) -> Result<Product, ProductError> {
        debug!("Sending request");
        let liked = match self
            .inner
            .perform_action(product, ProductAction::AddLike(user))
            .await?
        {
            ProductActionResult::AddLike(liked) => liked,
            other => return Err(unexpected(other)),
        };

        if let Err(e) = self.users.like(user, product).await {
            self.undo(product, ProductAction::RemoveLike(user)).await;
            return Err(e.into());
        }
        Ok(liked)
    }

    /// Removes `user`'s like from `product` on both documents.
    #[instrument(skip(self))]
    pub async fn unlike_product(
        &self,
        product: ProductId,
        user: UserId,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        let unliked = match self
            .inner
            .perform_action(product, ProductAction::RemoveLike(user))
            .await?
        {
            ProductActionResult::RemoveLike(unliked) => unliked,
            other => return Err(unexpected(other)),
        };

        if let Err(e) = self.users.unlike(user, product).await {
            self.undo(product, ProductAction::AddLike(user)).await;
            return Err(e.into());
        }
        Ok(unliked)
    }

    /// Clears the discount of every product whose discount ended at or before `now`.
    /// Returns how many products changed.
    #[instrument(skip(self))]
    pub async fn expire_discounts(&self, now: DateTime<Utc>) -> Result<usize, ProductError> {
        debug!("Sending request");
        let filter = Filter::new()
            .gt("discount", 0u32)
            .lte("discountEndDate", now);
        let update = ProductUpdate {
            discount: Some(0),
            ..Default::default()
        };
        let expired = self.inner.update_many(filter, update).await?;
        info!(expired, "Discounts expired");
        Ok(expired)
    }

    async fn undo(&self, product: ProductId, action: ProductAction) {
        if let Err(e) = self.inner.perform_action(product, action).await {
            error!(%product, error = %e, "Failed to undo like change");
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}
