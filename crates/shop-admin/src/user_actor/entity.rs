//! [`Document`] implementation for [`User`].

use super::actions::UserAction;
use super::error::UserError;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use chrono::Utc;
use docstore::{Document, FieldValue};

#[async_trait]
impl Document for User {
    const COLLECTION: &'static str = "users";
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = User;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let email = params.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(UserError::ValidationError(format!(
                "invalid email address: {email:?}"
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id,
            email,
            first_name: params.first_name,
            middle_name: params.middle_name,
            last_name: params.last_name,
            phone_number: params.phone_number,
            address: params.address,
            avatar: params.avatar,
            city: params.city,
            status: Default::default(),
            user_type: params.user_type,
            liked_products: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "email" => Some(self.email.as_str().into()),
            "firstName" => Some(self.first_name.as_str().into()),
            "lastName" => Some(self.last_name.as_str().into()),
            "phoneNumber" => Some(self.phone_number.as_str().into()),
            "status" => Some(self.status.code().into()),
            "city" => self.city.map(Into::into),
            "likedProducts" => Some(self.liked_products.clone().into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }

    /// Emails are unique regardless of case.
    fn unique_key(&self) -> Option<(&'static str, FieldValue)> {
        Some(("email", self.email.to_lowercase().into()))
    }

    /// Applies profile changes. Email and status may be repeated but not changed;
    /// emails compare the way [`unique_key`](Document::unique_key) does.
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        if update
            .email
            .is_some_and(|email| email.trim().to_lowercase() != self.email.to_lowercase())
        {
            return Err(UserError::ImmutableField("email"));
        }
        if update.status.is_some_and(|status| status != self.status) {
            return Err(UserError::ImmutableField("status"));
        }

        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(middle_name) = update.middle_name {
            self.middle_name = middle_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(city) = update.city {
            self.city = Some(city);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, action: UserAction, _ctx: &()) -> Result<User, UserError> {
        match action {
            UserAction::LikeProduct(product) => {
                if self.liked_products.contains(&product) {
                    return Err(UserError::AlreadyLiked {
                        user: self.id,
                        product,
                    });
                }
                self.liked_products.push(product);
            }
            UserAction::UnlikeProduct(product) => {
                let before = self.liked_products.len();
                self.liked_products.retain(|liked| *liked != product);
                if self.liked_products.len() == before {
                    return Err(UserError::NotLiked {
                        user: self.id,
                        product,
                    });
                }
            }
        }
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, UserStatus};

    fn alice() -> User {
        User::from_create_params(
            UserId(1),
            UserCreate::new("alice@example.com", "Alice", "Smith"),
        )
        .unwrap()
    }

    #[test]
    fn test_create_rejects_malformed_email() {
        let err = User::from_create_params(UserId(1), UserCreate::new("nobody", "N", "B"));
        assert!(matches!(err, Err(UserError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_cannot_change_email_or_status() {
        let mut user = alice();
        let update = UserUpdate {
            email: Some("other@example.com".into()),
            ..Default::default()
        };
        assert_eq!(
            user.on_update(update, &()).await,
            Err(UserError::ImmutableField("email"))
        );

        let update = UserUpdate {
            status: Some(UserStatus::Blocked),
            ..Default::default()
        };
        assert_eq!(
            user.on_update(update, &()).await,
            Err(UserError::ImmutableField("status"))
        );

        let update = UserUpdate {
            email: Some("alice@example.com".into()),
            status: Some(UserStatus::Active),
            phone_number: Some("555-0100".into()),
            ..Default::default()
        };
        user.on_update(update, &()).await.unwrap();
        assert_eq!(user.phone_number, "555-0100");

        let update = UserUpdate {
            email: Some(" ALICE@Example.com ".into()),
            ..Default::default()
        };
        user.on_update(update, &()).await.unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_like_and_unlike_are_not_repeatable() {
        let mut user = alice();
        let liked = user
            .handle_action(UserAction::LikeProduct(ProductId(3)), &())
            .await
            .unwrap();
        assert_eq!(liked.liked_products, vec![ProductId(3)]);

        assert!(matches!(
            user.handle_action(UserAction::LikeProduct(ProductId(3)), &()).await,
            Err(UserError::AlreadyLiked { .. })
        ));

        user.handle_action(UserAction::UnlikeProduct(ProductId(3)), &())
            .await
            .unwrap();
        assert!(matches!(
            user.handle_action(UserAction::UnlikeProduct(ProductId(3)), &()).await,
            Err(UserError::NotLiked { .. })
        ));
    }
}
