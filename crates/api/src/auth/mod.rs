//! Customer authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- access-token issuance and validation.

pub mod jwt;
pub mod password;
