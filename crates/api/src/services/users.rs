//! User registration, login and profile management.

use domain::models::{NewUser, User, UserFilter, UserPatch};
use domain::services::{StoreError, UserStore};
use serde::Deserialize;
use shared::jwt::{JwtError, Permission, TokenService};
use shared::password::{hash_password, verify_password, PasswordError};
use shared::validation::{
    messages, validate_full_name, validate_password, validate_phone_number,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{ApiError, PHONE_TAKEN_MESSAGE};
use crate::middleware::metrics::{record_login, record_user_registered};

pub const USER_DOES_NOT_EXIST_MESSAGE: &str = "user does not exist";
pub const INVALID_PASSWORD_MESSAGE: &str = "invalid password";
pub const USER_NOT_FOUND_MESSAGE: &str = "user not found";

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Phone number already registered")]
    PhoneNumberTaken,

    #[error("No user with that phone number")]
    UserDoesNotExist,

    #[error("Invalid password")]
    InvalidPassword,

    /// The authenticated user has no stored row.
    #[error("User not found")]
    UserNotFound,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Validation(messages) => ApiError::Validation(messages),
            UserServiceError::PhoneNumberTaken => ApiError::Conflict(PHONE_TAKEN_MESSAGE.into()),
            UserServiceError::UserDoesNotExist => {
                ApiError::Validation(vec![USER_DOES_NOT_EXIST_MESSAGE.into()])
            }
            UserServiceError::InvalidPassword => {
                ApiError::Validation(vec![INVALID_PASSWORD_MESSAGE.into()])
            }
            UserServiceError::UserNotFound => {
                ApiError::MissingRecord(USER_NOT_FOUND_MESSAGE.into())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Maps a failed insert or update, turning a phone number collision into
/// [`UserServiceError::PhoneNumberTaken`].
fn write_error(err: StoreError) -> UserServiceError {
    if err.is_unique_violation() {
        UserServiceError::PhoneNumberTaken
    } else {
        UserServiceError::Store(err)
    }
}

/// Request body shared by register, login and update. Every field is
/// optional at decode time; the validators decide what is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user_id: i64,
    pub token: String,
}

/// Service for user accounts.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Validates all three fields, reporting every failure, then stores the
    /// user with a hashed password and returns its id.
    pub async fn register(&self, request: &UserRequest) -> Result<i64, UserServiceError> {
        let (phone_number, phone_errors) = validate_phone_number(request.phone_number.as_deref());
        let (full_name, name_errors) = validate_full_name(request.full_name.as_deref());
        let (password, password_errors) = validate_password(request.password.as_deref());

        let errors: Vec<String> = [phone_errors, name_errors, password_errors]
            .iter()
            .flat_map(|errors| messages(errors))
            .collect();
        if !errors.is_empty() {
            debug!(count = errors.len(), "Registration rejected by validation");
            return Err(UserServiceError::Validation(errors));
        }

        let new_user = NewUser {
            full_name,
            phone_number,
            password_hash: hash_password(&password)?,
        };

        let user_id = self.store.insert(new_user).await.map_err(write_error)?;

        record_user_registered();
        info!(user_id = user_id, "User registered");
        Ok(user_id)
    }

    /// Checks credentials, bumps the login counter and issues a token
    /// carrying every permission.
    pub async fn login(&self, request: &UserRequest) -> Result<LoginResult, UserServiceError> {
        let (phone_number, phone_errors) = validate_phone_number(request.phone_number.as_deref());
        if !phone_errors.is_empty() {
            record_login("invalid_input");
            return Err(UserServiceError::Validation(messages(&phone_errors)));
        }

        let user = match self
            .store
            .find(&UserFilter::by_phone_number(phone_number))
            .await?
            .into_iter()
            .next()
        {
            Some(user) => user,
            None => {
                record_login("unknown_user");
                debug!("Login rejected: unknown phone number");
                return Err(UserServiceError::UserDoesNotExist);
            }
        };

        let (password, password_errors) = validate_password(request.password.as_deref());
        if !password_errors.is_empty() {
            record_login("invalid_input");
            return Err(UserServiceError::Validation(messages(&password_errors)));
        }

        if !verify_password(&password, &user.password_hash)? {
            record_login("invalid_password");
            debug!(user_id = user.id, "Login rejected: invalid password");
            return Err(UserServiceError::InvalidPassword);
        }

        if let Err(e) = self.store.increment_login_count(user.id).await {
            warn!(user_id = user.id, error = %e, "Failed to increment login count");
        }

        let token = self.tokens.issue(user.id, Permission::all())?;

        record_login("success");
        info!(user_id = user.id, "Login succeeded");
        Ok(LoginResult {
            user_id: user.id,
            token,
        })
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<User, UserServiceError> {
        self.store
            .find(&UserFilter::by_id(user_id))
            .await?
            .into_iter()
            .next()
            .ok_or(UserServiceError::UserNotFound)
    }

    /// Validates and applies only the fields present in `request`.
    /// `password` is ignored here.
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: &UserRequest,
    ) -> Result<(), UserServiceError> {
        let mut patch = UserPatch::new(user_id);
        let mut errors = Vec::new();

        if let Some(phone_number) = request.phone_number.as_deref() {
            let (value, field_errors) = validate_phone_number(Some(phone_number));
            errors.extend(messages(&field_errors));
            patch.phone_number = Some(value);
        }
        if let Some(full_name) = request.full_name.as_deref() {
            let (value, field_errors) = validate_full_name(Some(full_name));
            errors.extend(messages(&field_errors));
            patch.full_name = Some(value);
        }

        if !errors.is_empty() {
            debug!(user_id = user_id, count = errors.len(), "Profile update rejected by validation");
            return Err(UserServiceError::Validation(errors));
        }

        let affected = self.store.update(&patch).await.map_err(write_error)?;

        if affected == 0 {
            return Err(UserServiceError::UserNotFound);
        }

        info!(user_id = user_id, "Profile updated");
        Ok(())
    }
}
