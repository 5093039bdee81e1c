use super::{CityId, ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserStatus {
    Blocked,
    #[default]
    Active,
}

impl UserStatus {
    /// Numeric code as stored by the admin UI (0 blocked, 1 active).
    pub fn code(self) -> u32 {
        match self {
            UserStatus::Blocked => 0,
            UserStatus::Active => 1,
        }
    }
}

/// How the account was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserType {
    #[default]
    Email,
    Google,
    Facebook,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    pub avatar: String,
    pub city: Option<CityId>,
    pub status: UserStatus,
    pub user_type: UserType,
    pub liked_products: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCreate {
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
    pub avatar: String,
    pub city: Option<CityId>,
    pub user_type: UserType,
}

impl UserCreate {
    pub fn new(email: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }
}

/// Profile changes. `email` and `status` are accepted only when they repeat the
/// current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub status: Option<UserStatus>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
    pub city: Option<CityId>,
}

/// Listing filters for users. Search matches the email.
#[derive(Debug, Clone, Default)]
pub struct UserListParams {
    pub list: super::ListParams,
    pub statuses: Vec<UserStatus>,
}
