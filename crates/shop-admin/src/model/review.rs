use super::{ListParams, ProductId, ReviewId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub content: String,
    /// 1 to 5.
    pub star: u8,
    pub product: ProductId,
    pub user: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewCreate {
    pub content: String,
    pub star: u8,
    pub product: ProductId,
    pub user: UserId,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewUpdate {
    pub content: Option<String>,
    pub star: Option<u8>,
}

/// Listing filters for reviews. Search matches the content.
#[derive(Debug, Clone, Default)]
pub struct ReviewListParams {
    pub list: ListParams,
    pub users: Vec<UserId>,
    pub products: Vec<ProductId>,
}
