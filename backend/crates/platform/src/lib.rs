//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (bcrypt, configurable work factor)
//! - Cookie management
//! - Signed token utilities (HMAC-SHA256)

pub mod cookie;
pub mod crypto;
pub mod password;
