//! Key derivation functions.
//!
//! Currently provides PBKDF2-HMAC-SHA256.

mod pbkdf2;

pub use pbkdf2::{
    MAX_OUTPUT_LEN, Pbkdf2ParamError, Pbkdf2Params, pbkdf2_sha256, pbkdf2_sha256_into,
};
