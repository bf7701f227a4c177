//! Domain layer for the user service.
//!
//! This crate contains:
//! - Domain models (User, NewUser, UserFilter, UserPatch)
//! - The persistence contract handlers depend on (UserStore)
//! - Domain error types

pub mod models;
pub mod services;
