//! Parameter definitions and validation for PBKDF2.

use thiserror::Error;

use crate::hash::sha256::DIGEST_LEN;

/// Largest output PBKDF2 can produce: `(2^32 - 1)` blocks of 32 bytes.
pub const MAX_OUTPUT_LEN: u64 = u32::MAX as u64 * DIGEST_LEN as u64;

/// Configuration for a PBKDF2-HMAC-SHA256 derivation.
///
/// # Recommended Values
///
/// OWASP recommends at least 600 000 iterations for password storage with
/// HMAC-SHA256. The default here is lower and suited to key derivation from
/// already high-entropy secrets; raise it for passwords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pbkdf2Params {
    /// Number of HMAC iterations per output block (minimum 1).
    pub iterations: u32,
    /// Number of bytes to derive (minimum 1).
    pub output_len: usize,
}

/// Errors that can occur during parameter validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Pbkdf2ParamError {
    /// Iteration count must be at least 1.
    #[error("iteration count must be at least 1")]
    TooFewIterations,
    /// Output length must be at least 1 byte.
    #[error("output length must be at least 1 byte")]
    EmptyOutput,
    /// Output length exceeds `(2^32 - 1) * 32` bytes.
    #[error("output length {0} exceeds the PBKDF2 maximum")]
    OutputTooLong(usize),
}

impl Pbkdf2Params {
    /// Builds a parameter set without validating it.
    pub fn new(iterations: u32, output_len: usize) -> Self {
        Self {
            iterations,
            output_len,
        }
    }

    /// Checks the parameters against the PBKDF2 limits.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), Pbkdf2ParamError> {
        if self.iterations < 1 {
            return Err(Pbkdf2ParamError::TooFewIterations);
        }

        if self.output_len == 0 {
            return Err(Pbkdf2ParamError::EmptyOutput);
        }

        if self.output_len as u64 > MAX_OUTPUT_LEN {
            return Err(Pbkdf2ParamError::OutputTooLong(self.output_len));
        }

        Ok(())
    }

    /// Number of 32-byte blocks needed to cover `output_len`.
    pub(crate) fn blocks(&self) -> usize {
        self.output_len.div_ceil(DIGEST_LEN)
    }
}

impl Default for Pbkdf2Params {
    /// Default parameters: 100 000 iterations, 32-byte output.
    fn default() -> Self {
        Self {
            iterations: 100_000,
            output_len: DIGEST_LEN,
        }
    }
}
