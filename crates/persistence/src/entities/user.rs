//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: String,
    pub successful_login_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            phone_number: entity.phone_number,
            password_hash: entity.password_hash,
            successful_login_count: entity.successful_login_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_into_domain_user() {
        let now = Utc::now();
        let entity = UserEntity {
            id: 12,
            full_name: "Budi Santoso".to_string(),
            phone_number: "+628123456789".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            successful_login_count: 3,
            created_at: now,
            updated_at: now,
        };

        let user: domain::models::User = entity.into();
        assert_eq!(user.id, 12);
        assert_eq!(user.phone_number, "+628123456789");
        assert_eq!(user.successful_login_count, 3);
    }
}
