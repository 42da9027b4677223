//! NaCl primitive kernels.
//!
//! This crate provides the deterministic numeric building blocks that the
//! NaCl constructions (box, secretbox, sign) are assembled from. It does
//! not provide those constructions itself.
//!
//! The focus is on **bit-exact behavior and constant-time execution** for
//! secret-dependent paths, rather than on a high-level API.
//!
//! # Module overview
//!
//! - `pool`
//!   Reusable fixed-length numeric buffers keyed by element width and
//!   length, with explicit secure wiping.
//!
//! - `stream`
//!   The Salsa20 and HSalsa20 core functions, plus Salsa20/XSalsa20
//!   keystream XOR built on them.
//!
//! - `hash`
//!   Streaming SHA-256.
//!
//! - `mac`
//!   HMAC-SHA256.
//!
//! - `derivation`
//!   PBKDF2-HMAC-SHA256 key derivation.
//!
//! - `curve25519`
//!   Field arithmetic modulo `2^255 - 19` and scalar arithmetic modulo the
//!   Ed25519 group order. Point arithmetic lives in the callers.
//!
//! - `nonce`
//!   Lane-wise counter arithmetic on 24-byte nonces.
//!
//! # Errors
//!
//! Every fallible operation returns [`Result`], and every error is a
//! precondition violation by the caller (see [`Error`]).
//!
//! # Logging
//!
//! Diagnostics go through the [`log`] facade. No secret material or buffer
//! content is ever logged.

pub mod curve25519;
pub mod derivation;
pub mod error;
pub mod hash;
pub mod mac;
pub mod nonce;
pub mod pool;
pub mod stream;

pub use error::{Error, Result};
