//! Persistence boundary for user accounts.
//!
//! Handlers depend on [`UserStore`] rather than on a database driver; the
//! PostgreSQL implementation lives in the persistence crate.

use thiserror::Error;

use crate::models::{NewUser, User, UserFilter, UserPatch};

/// Errors reported by a [`UserStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique constraint (the phone number index) rejected the write.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("User not found")]
    NotFound,

    #[error("User filter cannot be empty")]
    EmptyFilter,

    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }
}

/// Storage operations over user records.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user with a zero login count and returns its id.
    async fn insert(&self, user: NewUser) -> Result<i64, StoreError>;

    /// Returns the users matching every criterion of `filter`, ordered by id.
    /// An empty filter is rejected with [`StoreError::EmptyFilter`].
    async fn find(&self, filter: &UserFilter) -> Result<Vec<User>, StoreError>;

    /// Applies a partial update and returns the number of rows affected.
    async fn update(&self, patch: &UserPatch) -> Result<u64, StoreError>;

    /// Atomically adds one to the successful login counter.
    /// Returns [`StoreError::NotFound`] when no row has the given id.
    async fn increment_login_count(&self, id: i64) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_unique_violation() {
        let err = StoreError::UniqueViolation {
            constraint: "users_phone_number_key".to_string(),
        };
        assert!(err.is_unique_violation());
        assert!(!StoreError::NotFound.is_unique_violation());
        assert!(!StoreError::Database("boom".into()).is_unique_violation());
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::UniqueViolation {
            constraint: "users_phone_number_key".to_string(),
        };
        assert!(err.to_string().contains("users_phone_number_key"));
        assert_eq!(StoreError::NotFound.to_string(), "User not found");
        assert_eq!(
            StoreError::EmptyFilter.to_string(),
            "User filter cannot be empty"
        );
    }
}
