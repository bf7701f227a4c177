//! Persistence layer for the user service.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - The PostgreSQL `UserStore` implementation

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
