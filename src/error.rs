//! Crate-wide error type.
//!
//! Every error here is a caller contract violation: a buffer of the wrong
//! length, an out-of-range nonce delta, a buffer that cannot be filed back
//! into a pool, or invalid key-derivation parameters. None of them are
//! transient and none are retried internally. They surface at the call that
//! violated the precondition.

use thiserror::Error;

use crate::derivation::Pbkdf2ParamError;

/// Errors reported by the kernels in this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A fixed-size input or output buffer had the wrong length.
    #[error("invalid {what} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Which argument was rejected (e.g. `"salsa20 key"`).
        what: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// `advance` only accepts deltas in `1..=255`.
    #[error("nonce delta {0} out of range 1..=255")]
    DeltaOutOfRange(u32),

    /// The buffer handed to `recycle` is a view into a larger allocation.
    #[error("cannot recycle a sub-view: length {len}, backing capacity {capacity}")]
    SubViewRecycled {
        /// Visible length of the buffer.
        len: usize,
        /// Capacity of the backing allocation.
        capacity: usize,
    },

    /// PBKDF2 parameters were rejected by validation.
    #[error("invalid PBKDF2 parameters: {0}")]
    Pbkdf2Params(#[from] Pbkdf2ParamError),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Borrows `buf` as a fixed-size array after checking its length.
#[inline]
pub(crate) fn as_array<'a, const N: usize>(what: &'static str, buf: &'a [u8]) -> Result<&'a [u8; N]> {
    buf.try_into().map_err(|_| Error::InvalidLength {
        what,
        expected: N,
        actual: buf.len(),
    })
}

/// Mutable counterpart of [`as_array`].
#[inline]
pub(crate) fn as_array_mut<'a, const N: usize>(
    what: &'static str,
    buf: &'a mut [u8],
) -> Result<&'a mut [u8; N]> {
    let actual = buf.len();

    buf.try_into().map_err(|_| Error::InvalidLength {
        what,
        expected: N,
        actual,
    })
}
