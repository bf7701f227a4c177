//! Shared building blocks for the user service.
//!
//! This crate provides functionality used by the other crates:
//! - Field validation rules (phone number, full name, password)
//! - Password hashing with Argon2id
//! - RS256 access tokens and permissions

pub mod jwt;
pub mod password;
pub mod validation;
