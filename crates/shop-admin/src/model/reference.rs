//! Reference data: cities, product types and payment types.
//!
//! All three share one shape (a unique name plus timestamps) and one pair of DTOs.

use super::{CityId, PaymentTypeId, ProductTypeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! reference_model {
    ($(#[$meta:meta])* $name:ident, $id:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: $id,
            pub name: String,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }
    };
}

reference_model!(
    /// A delivery city.
    City, CityId
);
reference_model!(
    /// A catalog category.
    ProductType, ProductTypeId
);
reference_model!(
    /// An accepted payment method.
    PaymentType, PaymentTypeId
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceCreate {
    pub name: String,
}

impl ReferenceCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceUpdate {
    pub name: Option<String>,
}
