//! User account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    #[serde(skip_serializing)] // Never serialize password hash to API responses
    pub password_hash: String,
    pub successful_login_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated registration, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub phone_number: String,
    /// Argon2id PHC string, never the plaintext password.
    pub password_hash: String,
}

/// Lookup criteria for users. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub user_id: Option<i64>,
    pub phone_number: Option<String>,
}

impl UserFilter {
    pub fn by_id(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn by_phone_number(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            ..Default::default()
        }
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.phone_number.is_none()
    }

    /// Whether `user` satisfies every criterion of this filter.
    pub fn matches(&self, user: &User) -> bool {
        self.user_id.map_or(true, |id| user.id == id)
            && self
                .phone_number
                .as_deref()
                .map_or(true, |phone| user.phone_number == phone)
    }
}

/// Partial profile update. `None` fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPatch {
    pub id: i64,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

impl UserPatch {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            full_name: None,
            phone_number: None,
        }
    }

    /// Applies the patch to `user`, refreshing `updated_at`.
    pub fn apply(&self, user: &mut User, now: DateTime<Utc>) {
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            user.phone_number = phone_number.clone();
        }
        user.updated_at = now;
    }
}
