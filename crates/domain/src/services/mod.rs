//! Domain services for the user service.
//!
//! Services define the contracts business logic depends on.

pub mod user_store;

pub use user_store::{StoreError, UserStore};
