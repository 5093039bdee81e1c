use crate::model::{ProductId, Review, ReviewCreate, ReviewId, ReviewListParams, ReviewUpdate};
use crate::review_actor::ReviewError;
use async_trait::async_trait;
use docstore::{CollectionClient, Filter, Page, Pagination, Query, Repository, StoreError};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Client for interacting with the Review actor.
#[derive(Clone)]
pub struct ReviewClient {
    inner: CollectionClient<Review>,
    page_size: u32,
}

impl ReviewClient {
    pub fn new(inner: CollectionClient<Review>, page_size: u32) -> Self {
        Self { inner, page_size }
    }
}

#[async_trait]
impl Repository<Review> for ReviewClient {
    type Error = ReviewError;

    fn inner(&self) -> &CollectionClient<Review> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        ReviewError::from(e)
    }
}

impl ReviewClient {
    #[instrument(skip(self))]
    pub async fn create_review(&self, params: ReviewCreate) -> Result<Review, ReviewError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_review(&self, id: ReviewId, update: ReviewUpdate) -> Result<Review, ReviewError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    pub async fn review_details(&self, id: ReviewId) -> Result<Review, ReviewError> {
        self.fetch(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_reviews(&self, params: &ReviewListParams) -> Result<Page<Review>, ReviewError> {
        debug!("Sending request");
        let filter = Filter::new()
            .one_of("user", params.users.iter().copied())
            .one_of("product", params.products.iter().copied())
            .search(&["content"], params.list.search_text());
        let query = Query::new(filter)
            .sorted(params.list.sort())
            .paginate(params.list.pagination(self.page_size));
        Ok(self.inner.find(query).await?)
    }

    /// Mean star rating per product. Products without reviews are absent from the map.
    #[instrument(skip(self))]
    pub async fn average_ratings(
        &self,
        products: &[ProductId],
    ) -> Result<HashMap<ProductId, f64>, ReviewError> {
        if products.is_empty() {
            return Ok(HashMap::new());
        }
        debug!("Sending request");
        let query = Query::new(Filter::new().one_of("product", products.iter().copied()))
            .paginate(Pagination::All);
        let reviews = self.inner.find(query).await?;

        let mut totals: HashMap<ProductId, (u32, u32)> = HashMap::new();
        for review in &reviews.items {
            let entry = totals.entry(review.product).or_default();
            entry.0 += u32::from(review.star);
            entry.1 += 1;
        }
        Ok(totals
            .into_iter()
            .map(|(product, (sum, count))| (product, f64::from(sum) / f64::from(count)))
            .collect())
    }
}
