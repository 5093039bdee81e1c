//! # Domain Model
//!
//! Plain data for every collection, the typed identifiers that link them, and the
//! listing parameters shared by all `list_*` operations. The `Document`
//! implementations live next to each actor (`*_actor/entity.rs`).

use docstore::{Pagination, SortSpec};

pub mod order;
pub mod product;
pub mod reference;
pub mod review;
pub mod user;

pub use order::*;
pub use product::*;
pub use reference::*;
pub use review::*;
pub use user::*;

/// Declares a typed identifier over the collection's `u32` counter.
macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl From<$name> for docstore::FieldValue {
            fn from(id: $name) -> Self {
                docstore::FieldValue::from(id.0)
            }
        }
    };
}

document_id!(
    /// Type-safe identifier for Users.
    UserId, "user"
);
document_id!(
    /// Type-safe identifier for Products.
    ProductId, "product"
);
document_id!(
    /// Type-safe identifier for Orders.
    OrderId, "order"
);
document_id!(
    /// Type-safe identifier for Reviews.
    ReviewId, "review"
);
document_id!(CityId, "city");
document_id!(ProductTypeId, "product_type");
document_id!(PaymentTypeId, "payment_type");

/// Search, sort and page window accepted by every listing.
///
/// `order` is a sort expression such as `"createdAt desc, name asc"`. A missing
/// `page` means page 1; a missing `limit` falls back to the configured page size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub search: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    pub fn pagination(&self, default_limit: u32) -> Pagination {
        Pagination::page(self.page.unwrap_or(1), self.limit.unwrap_or(default_limit))
    }

    pub fn sort(&self) -> SortSpec {
        self.order.as_deref().map(SortSpec::parse).unwrap_or_default()
    }

    pub fn search_text(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore::SortDirection;

    #[test]
    fn test_ids_display_with_collection_prefix() {
        assert_eq!(ProductId(7).to_string(), "product_7");
        assert_eq!(PaymentTypeId(2).to_string(), "payment_type_2");
        assert_eq!(OrderId::from(3), OrderId(3));
    }

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::default();
        assert_eq!(params.pagination(10), Pagination::page(1, 10));
        assert!(params.sort().is_empty());

        let params = ListParams {
            order: Some("createdAt desc".into()),
            page: Some(2),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(params.pagination(10), Pagination::page(2, 5));
        assert_eq!(
            params.sort().keys(),
            &[("createdAt".to_string(), SortDirection::Descending)]
        );
    }
}
