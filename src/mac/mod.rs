//! Message authentication codes.
//!
//! Currently provides HMAC over SHA-256, the PRF behind PBKDF2.

pub mod hmac;

pub use hmac::{HmacSha256, hmac_sha256};
