use super::error::ReviewError;
use crate::model::{Review, ReviewCreate, ReviewId, ReviewUpdate};
use async_trait::async_trait;
use chrono::Utc;
use docstore::{Document, FieldValue};

fn validate_star(star: u8) -> Result<u8, ReviewError> {
    if (1..=5).contains(&star) {
        Ok(star)
    } else {
        Err(ReviewError::InvalidStar(star))
    }
}

#[async_trait]
impl Document for Review {
    const COLLECTION: &'static str = "reviews";
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = ReviewError;

    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, ReviewError> {
        let star = validate_star(params.star)?;
        if params.content.trim().is_empty() {
            return Err(ReviewError::ValidationError("content cannot be empty".into()));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            content: params.content,
            star,
            product: params.product,
            user: params.user,
            created_at: now,
            updated_at: now,
        })
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "content" => Some(self.content.as_str().into()),
            "star" => Some(u32::from(self.star).into()),
            "product" => Some(self.product.into()),
            "user" => Some(self.user.into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }

    async fn on_update(&mut self, update: ReviewUpdate, _ctx: &()) -> Result<(), ReviewError> {
        if let Some(star) = update.star {
            self.star = validate_star(star)?;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), ReviewError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, UserId};

    #[test]
    fn test_star_must_be_one_to_five() {
        for star in [0, 6] {
            let params = ReviewCreate {
                content: "ok".into(),
                star,
                product: ProductId(1),
                user: UserId(1),
            };
            assert_eq!(
                Review::from_create_params(ReviewId(1), params),
                Err(ReviewError::InvalidStar(star))
            );
        }
    }
}
