//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod user;

pub use user::UserEntity;
