//! Business operations behind the HTTP handlers.

pub mod users;

pub use users::{LoginResult, UserRequest, UserService, UserServiceError};
