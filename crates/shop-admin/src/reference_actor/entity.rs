use super::error::ReferenceError;
use crate::model::{
    City, CityId, PaymentType, PaymentTypeId, ProductType, ProductTypeId, ReferenceCreate,
    ReferenceUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use docstore::{Document, FieldValue};

fn validate_name(name: &str) -> Result<String, ReferenceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ReferenceError::ValidationError("name cannot be empty".into()));
    }
    Ok(name.to_string())
}

/// Implements [`Document`] for a reference model: a unique, case-insensitive name.
macro_rules! reference_document {
    ($model:ident, $id:ident, $collection:literal) => {
        #[async_trait]
        impl Document for $model {
            const COLLECTION: &'static str = $collection;
            type Id = $id;
            type Create = ReferenceCreate;
            type Update = ReferenceUpdate;
            type Action = ();
            type ActionResult = ();
            type Context = ();
            type Error = ReferenceError;

            fn from_create_params(id: $id, params: ReferenceCreate) -> Result<Self, ReferenceError> {
                let now = Utc::now();
                Ok(Self {
                    id,
                    name: validate_name(&params.name)?,
                    created_at: now,
                    updated_at: now,
                })
            }

            fn field(&self, name: &str) -> Option<FieldValue> {
                match name {
                    "id" => Some(self.id.into()),
                    "name" => Some(self.name.as_str().into()),
                    "createdAt" => Some(self.created_at.into()),
                    "updatedAt" => Some(self.updated_at.into()),
                    _ => None,
                }
            }

            fn unique_key(&self) -> Option<(&'static str, FieldValue)> {
                Some(("name", self.name.to_lowercase().into()))
            }

            async fn on_update(&mut self, update: ReferenceUpdate, _ctx: &()) -> Result<(), ReferenceError> {
                if let Some(name) = update.name {
                    self.name = validate_name(&name)?;
                }
                self.updated_at = Utc::now();
                Ok(())
            }

            async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), ReferenceError> {
                Ok(())
            }
        }
    };
}

reference_document!(City, CityId, "cities");
reference_document!(ProductType, ProductTypeId, "product_types");
reference_document!(PaymentType, PaymentTypeId, "payment_types");
