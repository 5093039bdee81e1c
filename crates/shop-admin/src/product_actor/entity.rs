use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, StockLevel};
use async_trait::async_trait;
use chrono::Utc;
use docstore::{Document, FieldValue};

fn validate_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::ValidationError(format!("invalid price: {price}")));
    }
    Ok(())
}

fn validate_discount(discount: u32) -> Result<(), ProductError> {
    if discount > 100 {
        return Err(ProductError::ValidationError(format!(
            "discount must be between 0 and 100, got {discount}"
        )));
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), ProductError> {
    if slug.trim().is_empty() {
        return Err(ProductError::ValidationError("slug cannot be empty".into()));
    }
    Ok(())
}

#[async_trait]
impl Document for Product {
    const COLLECTION: &'static str = "products";
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError("name cannot be empty".into()));
        }
        validate_slug(&params.slug)?;
        validate_price(params.price)?;

        let discount = params.discount.unwrap_or(0);
        validate_discount(discount)?;
        let (discount_start_date, discount_end_date) = if discount > 0 {
            (params.discount_start_date, params.discount_end_date)
        } else {
            (None, None)
        };

        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name,
            slug: params.slug,
            image: params.image,
            product_type: params.product_type,
            price: params.price,
            count_in_stock: params.count_in_stock,
            sold: 0,
            description: params.description,
            discount,
            discount_start_date,
            discount_end_date,
            liked_by: Vec::new(),
            total_likes: 0,
            created_at: now,
            updated_at: now,
        })
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "slug" => Some(self.slug.as_str().into()),
            "type" => Some(self.product_type.into()),
            "price" => Some(self.price.into()),
            "countInStock" => Some(self.count_in_stock.into()),
            "sold" => Some(self.sold.into()),
            "discount" => Some(self.discount.into()),
            "discountStartDate" => self.discount_start_date.map(Into::into),
            "discountEndDate" => self.discount_end_date.map(Into::into),
            "totalLikes" => Some(self.total_likes.into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }

    fn unique_key(&self) -> Option<(&'static str, FieldValue)> {
        Some(("slug", self.slug.as_str().into()))
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(ProductError::ValidationError("name cannot be empty".into()));
            }
            self.name = name;
        }
        if let Some(slug) = update.slug {
            validate_slug(&slug)?;
            self.slug = slug;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(product_type) = update.product_type {
            self.product_type = product_type;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(discount) = update.discount {
            validate_discount(discount)?;
            self.discount = discount;
        }
        if update.discount_start_date.is_some() {
            self.discount_start_date = update.discount_start_date;
        }
        if update.discount_end_date.is_some() {
            self.discount_end_date = update.discount_end_date;
        }
        if self.discount == 0 {
            self.discount_start_date = None;
            self.discount_end_date = None;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(StockLevel {
                count_in_stock: self.count_in_stock,
                sold: self.sold,
            })),
            ProductAction::ReserveStock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.count_in_stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        product: self.id,
                        requested: quantity,
                        available: self.count_in_stock,
                    });
                }
                self.count_in_stock -= quantity;
                self.sold += quantity;
                Ok(ProductActionResult::ReserveStock(self.touch()))
            }
            ProductAction::ReleaseStock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.sold < quantity {
                    return Err(ProductError::ReleaseExceedsSold {
                        product: self.id,
                        requested: quantity,
                        sold: self.sold,
                    });
                }
                self.sold -= quantity;
                self.count_in_stock += quantity;
                Ok(ProductActionResult::ReleaseStock(self.touch()))
            }
            ProductAction::AddLike(user) => {
                if self.liked_by.contains(&user) {
                    return Err(ProductError::AlreadyLiked {
                        product: self.id,
                        user,
                    });
                }
                self.liked_by.push(user);
                self.total_likes += 1;
                Ok(ProductActionResult::AddLike(self.touch()))
            }
            ProductAction::RemoveLike(user) => {
                if !self.liked_by.contains(&user) {
                    return Err(ProductError::NotLiked {
                        product: self.id,
                        user,
                    });
                }
                self.liked_by.retain(|liked| *liked != user);
                self.total_likes = self.total_likes.saturating_sub(1);
                Ok(ProductActionResult::RemoveLike(self.touch()))
            }
        }
    }
}

impl Product {
    /// Stamps `updated_at` and returns the new state.
    fn touch(&mut self) -> Product {
        self.updated_at = Utc::now();
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductTypeId, UserId};
    use chrono::Duration;

    fn keyboard(count_in_stock: u32) -> Product {
        Product::from_create_params(
            ProductId(1),
            ProductCreate {
                name: "Keyboard".into(),
                slug: "keyboard".into(),
                product_type: ProductTypeId(1),
                price: 50.0,
                count_in_stock,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_discount_dates_dropped_without_discount() {
        let now = Utc::now();
        let product = Product::from_create_params(
            ProductId(1),
            ProductCreate {
                name: "Mouse".into(),
                slug: "mouse".into(),
                price: 20.0,
                discount_start_date: Some(now),
                discount_end_date: Some(now + Duration::days(3)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(product.discount, 0);
        assert_eq!(product.discount_end_date, None);
    }

    #[test]
    fn test_create_validation() {
        let bad_discount = ProductCreate {
            name: "Mouse".into(),
            slug: "mouse".into(),
            discount: Some(150),
            ..Default::default()
        };
        assert!(matches!(
            Product::from_create_params(ProductId(1), bad_discount),
            Err(ProductError::ValidationError(_))
        ));

        let bad_price = ProductCreate {
            name: "Mouse".into(),
            slug: "mouse".into(),
            price: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            Product::from_create_params(ProductId(1), bad_price),
            Err(ProductError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_reserve_and_release_keep_counters_in_step() {
        let mut product = keyboard(5);

        let result = product
            .handle_action(ProductAction::ReserveStock(3), &())
            .await
            .unwrap();
        let ProductActionResult::ReserveStock(reserved) = result else {
            panic!("expected a ReserveStock result");
        };
        assert_eq!((reserved.count_in_stock, reserved.sold), (2, 3));

        let err = product
            .handle_action(ProductAction::ReserveStock(3), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                product: ProductId(1),
                requested: 3,
                available: 2,
            }
        );

        let err = product
            .handle_action(ProductAction::ReleaseStock(4), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::ReleaseExceedsSold { sold: 3, .. }));

        product
            .handle_action(ProductAction::ReleaseStock(3), &())
            .await
            .unwrap();
        let level = product
            .handle_action(ProductAction::CheckStock, &())
            .await
            .unwrap();
        assert_eq!(
            level,
            ProductActionResult::CheckStock(StockLevel {
                count_in_stock: 5,
                sold: 0,
            })
        );
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let mut product = keyboard(5);
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(0), &()).await,
            Err(ProductError::InvalidQuantity(0))
        );
    }

    #[tokio::test]
    async fn test_likes_track_total() {
        let mut product = keyboard(1);
        product
            .handle_action(ProductAction::AddLike(UserId(1)), &())
            .await
            .unwrap();
        product
            .handle_action(ProductAction::AddLike(UserId(2)), &())
            .await
            .unwrap();
        assert_eq!(product.total_likes, 2);

        assert!(matches!(
            product.handle_action(ProductAction::AddLike(UserId(1)), &()).await,
            Err(ProductError::AlreadyLiked { .. })
        ));

        product
            .handle_action(ProductAction::RemoveLike(UserId(1)), &())
            .await
            .unwrap();
        assert_eq!(product.total_likes, 1);
        assert_eq!(product.liked_by, vec![UserId(2)]);
    }
}
