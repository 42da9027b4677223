//! Curve25519 / Ed25519 number kernels.
//!
//! - [`field`]: arithmetic modulo `2^255 - 19` (`fe25519`)
//! - [`scalar`]: arithmetic modulo the group order ℓ (`sc25519`)
//!
//! Point arithmetic is built on top of these by the callers.

pub mod field;
pub mod scalar;

pub use field::{FIELD_BYTES, FieldElement};
pub use scalar::{ORDER, SCALAR_BYTES, Scalar, ShortScalar};
