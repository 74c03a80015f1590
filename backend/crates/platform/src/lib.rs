//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password policy validation (NIST SP 800-63B compliant)
//! - Password hashing and verification (Argon2id)

pub mod password;
