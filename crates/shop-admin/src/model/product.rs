//! Represents a product in the catalog.
//!
//! # Document Store
//! `Product` implements [`Document`](docstore::Document) (see `product_actor::entity`),
//! so it is managed by a [`CollectionActor`](docstore::CollectionActor). Stock moves
//! only through the `ReserveStock`/`ReleaseStock` actions, which keep
//! `count_in_stock` and `sold` in step.
use super::{ListParams, ProductId, ProductTypeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub product_type: ProductTypeId,
    pub price: f64,
    pub count_in_stock: u32,
    pub sold: u32,
    pub description: String,
    /// Percentage off `price`, 0 when no discount runs.
    pub discount: u32,
    pub discount_start_date: Option<DateTime<Utc>>,
    pub discount_end_date: Option<DateTime<Utc>>,
    pub liked_by: Vec<UserId>,
    pub total_likes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price after the running discount.
    pub fn effective_price(&self) -> f64 {
        self.price * f64::from(100 - self.discount.min(100)) / 100.0
    }
}

/// DTO for Product creation. Discount dates are kept only when `discount` is set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCreate {
    pub name: String,
    pub slug: String,
    pub image: String,
    pub product_type: ProductTypeId,
    pub price: f64,
    pub count_in_stock: u32,
    pub description: String,
    pub discount: Option<u32>,
    pub discount_start_date: Option<DateTime<Utc>>,
    pub discount_end_date: Option<DateTime<Utc>>,
}

/// DTO for Product updates. Stock counters are not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub product_type: Option<ProductTypeId>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub discount: Option<u32>,
    pub discount_start_date: Option<DateTime<Utc>>,
    pub discount_end_date: Option<DateTime<Utc>>,
}

/// Stock counters reported by `CheckStock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub count_in_stock: u32,
    pub sold: u32,
}

/// Listing filters for products. Search matches the name.
#[derive(Debug, Clone, Default)]
pub struct ProductListParams {
    pub list: ListParams,
    pub product_types: Vec<ProductTypeId>,
    /// Return every match on one page, ignoring `page`/`limit`.
    pub all: bool,
}

/// The product type of a listing row, with its name resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTypeRef {
    pub id: ProductTypeId,
    /// `None` when the type no longer exists.
    pub name: Option<String>,
}

/// Catalog listing row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: String,
    #[serde(rename = "type")]
    pub product_type: ProductTypeRef,
    pub price: f64,
    pub discount: u32,
    pub count_in_stock: u32,
    pub sold: u32,
    pub total_likes: u32,
    /// Mean review star rating, 0 when unrated.
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
}

impl ProductSummary {
    pub fn new(product: Product, type_name: Option<String>, average_rating: f64) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            image: product.image,
            product_type: ProductTypeRef {
                id: product.product_type,
                name: type_name,
            },
            price: product.price,
            discount: product.discount,
            count_in_stock: product.count_in_stock,
            sold: product.sold,
            total_likes: product.total_likes,
            average_rating,
            created_at: product.created_at,
        }
    }
}
