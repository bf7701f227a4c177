//! User repository for database operations.

use domain::models::{NewUser, User, UserFilter, UserPatch};
use domain::services::{StoreError, UserStore};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// PostgreSQL error code for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str =
    "id, full_name, phone_number, password_hash, successful_login_count, created_at, updated_at";

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Classifies a driver error into the store's error taxonomy.
pub fn map_store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::UniqueViolation {
                constraint: db_err.constraint().unwrap_or("unique").to_string(),
            }
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        _ => StoreError::Database(err.to_string()),
    }
}

fn select_query(filter: &UserFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM users WHERE true", USER_COLUMNS));

    if let Some(user_id) = filter.user_id {
        builder.push(" AND id = ").push_bind(user_id);
    }
    if let Some(phone_number) = &filter.phone_number {
        builder
            .push(" AND phone_number = ")
            .push_bind(phone_number.clone());
    }

    builder.push(" ORDER BY id");
    builder
}

fn update_query(patch: &UserPatch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE users SET ");

    {
        let mut fields = builder.separated(", ");
        if let Some(full_name) = &patch.full_name {
            fields
                .push("full_name = ")
                .push_bind_unseparated(full_name.clone());
        }
        if let Some(phone_number) = &patch.phone_number {
            fields
                .push("phone_number = ")
                .push_bind_unseparated(phone_number.clone());
        }
        fields.push("updated_at = NOW()");
    }

    builder.push(" WHERE id = ").push_bind(patch.id);
    builder
}

#[async_trait::async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, user: NewUser) -> Result<i64, StoreError> {
        let timer = QueryTimer::new("insert_user");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (full_name, phone_number, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map_err(map_store_error)
    }

    async fn find(&self, filter: &UserFilter) -> Result<Vec<User>, StoreError> {
        if filter.is_empty() {
            return Err(StoreError::EmptyFilter);
        }

        let timer = QueryTimer::new("find_users");
        let result = select_query(filter)
            .build_query_as::<UserEntity>()
            .fetch_all(&self.pool)
            .await;
        timer.record();

        Ok(result
            .map_err(map_store_error)?
            .into_iter()
            .map(User::from)
            .collect())
    }

    async fn update(&self, patch: &UserPatch) -> Result<u64, StoreError> {
        let timer = QueryTimer::new("update_user");
        let result = update_query(patch).build().execute(&self.pool).await;
        timer.record();
        Ok(result.map_err(map_store_error)?.rows_affected())
    }

    async fn increment_login_count(&self, id: i64) -> Result<(), StoreError> {
        let timer = QueryTimer::new("increment_user_login_count");
        let result = sqlx::query(
            r#"
            UPDATE users
            SET successful_login_count = successful_login_count + 1
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        timer.record();

        if result.map_err(map_store_error)?.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
