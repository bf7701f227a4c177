//! Repository implementations for database operations.

pub mod user;

pub use user::{map_store_error, UserRepository};
