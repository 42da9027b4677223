//! PBKDF2 with HMAC-SHA256 as the PRF (RFC 8018).
//!
//! For each 32-byte output block `i` (1-based):
//!
//! ```text
//! U_1 = HMAC(P, S || INT_BE32(i))
//! U_j = HMAC(P, U_{j-1})        j = 2..c
//! T_i = U_1 ⊕ U_2 ⊕ ... ⊕ U_c
//! ```
//!
//! The output is `T_1 || T_2 || ...`, truncated to the requested length.
//! The keyed HMAC state and the state after absorbing the salt are each
//! computed once and cloned, rather than re-keyed per iteration.

pub mod core;
pub(crate) mod params;

pub use self::core::{pbkdf2_sha256, pbkdf2_sha256_into};
pub use params::{MAX_OUTPUT_LEN, Pbkdf2ParamError, Pbkdf2Params};
