//! Clients for the reference collections (cities, product types, payment types).
//!
//! The three clients are identical apart from names, so one macro generates them:
//! `create_city`, `update_city`, `city_details`, `list_cities` and so on, plus the
//! shared `get`/`fetch`/`delete`/`delete_many` from [`Repository`].

use crate::model::{
    City, CityId, ListParams, PaymentType, PaymentTypeId, ProductType, ProductTypeId,
    ReferenceCreate, ReferenceUpdate,
};
use crate::reference_actor::ReferenceError;
use async_trait::async_trait;
use docstore::{CollectionClient, Filter, Page, Pagination, Query, Repository, StoreError};
use paste::paste;
use std::collections::HashMap;
use tracing::{debug, instrument};

macro_rules! reference_client {
    ($client:ident, $model:ident, $id:ident, $one:ident, $many:ident) => {
        paste! {
            #[doc = "Client for the `" $model "` collection."]
            #[derive(Clone)]
            pub struct $client {
                inner: CollectionClient<$model>,
                page_size: u32,
            }

            impl $client {
                pub fn new(inner: CollectionClient<$model>, page_size: u32) -> Self {
                    Self { inner, page_size }
                }

                #[instrument(skip(self))]
                pub async fn [<create_ $one>](&self, params: ReferenceCreate) -> Result<$model, ReferenceError> {
                    debug!("Sending request");
                    Ok(self.inner.create(params).await?)
                }

                #[instrument(skip(self))]
                pub async fn [<update_ $one>](&self, id: $id, update: ReferenceUpdate) -> Result<$model, ReferenceError> {
                    debug!("Sending request");
                    Ok(self.inner.update(id, update).await?)
                }

                pub async fn [<$one _details>](&self, id: $id) -> Result<$model, ReferenceError> {
                    self.fetch(id).await
                }

                /// Search matches the name.
                #[instrument(skip(self))]
                pub async fn [<list_ $many>](&self, params: &ListParams) -> Result<Page<$model>, ReferenceError> {
                    debug!("Sending request");
                    let query = Query::new(Filter::new().search(&["name"], params.search_text()))
                        .sorted(params.sort())
                        .paginate(params.pagination(self.page_size));
                    Ok(self.inner.find(query).await?)
                }
            }

            #[async_trait]
            impl Repository<$model> for $client {
                type Error = ReferenceError;

                fn inner(&self) -> &CollectionClient<$model> {
                    &self.inner
                }

                fn map_error(e: StoreError) -> Self::Error {
                    ReferenceError::from(e)
                }
            }
        }
    };
}

reference_client!(CityClient, City, CityId, city, cities);
reference_client!(ProductTypeClient, ProductType, ProductTypeId, product_type, product_types);
reference_client!(PaymentTypeClient, PaymentType, PaymentTypeId, payment_type, payment_types);

impl ProductTypeClient {
    /// Names of the given product types. Unknown ids are left out of the map.
    #[instrument(skip(self))]
    pub async fn names(
        &self,
        ids: &[ProductTypeId],
    ) -> Result<HashMap<ProductTypeId, String>, ReferenceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        debug!("Sending request");
        let query =
            Query::new(Filter::new().one_of("id", ids.iter().copied())).paginate(Pagination::All);
        let types = self.inner.find(query).await?;
        Ok(types
            .items
            .into_iter()
            .map(|product_type| (product_type.id, product_type.name))
            .collect())
    }
}
