//! PBKDF2-HMAC-SHA256 derivation.

use log::{debug, warn};

use super::params::Pbkdf2Params;
use crate::error::Result;
use crate::hash::sha256::DIGEST_LEN;
use crate::mac::HmacSha256;
use crate::pool::{wipe, with_available_factory};

/// Derives `output_len` bytes from `password` and `salt`.
///
/// The returned buffer comes from this thread's
/// [`ArrayFactory`](crate::pool::ArrayFactory); it may be recycled there
/// once the caller is done with it. Calling this from inside
/// [`with_local_factory`](crate::pool::with_local_factory) is fine: scratch
/// then comes from a short-lived factory instead.
///
/// # Errors
///
/// Returns [`Error::Pbkdf2Params`](crate::Error::Pbkdf2Params) if
/// `iterations` is zero, `output_len` is zero, or `output_len` exceeds
/// [`MAX_OUTPUT_LEN`](super::MAX_OUTPUT_LEN).
///
/// # Example
///
/// ```
/// use saltcore::derivation::pbkdf2_sha256;
///
/// let key = pbkdf2_sha256(b"password", b"salt", 1, 32).unwrap();
/// assert_eq!(key[..4], [0x12, 0x0f, 0xb6, 0xcf]);
/// ```
pub fn pbkdf2_sha256(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output_len: usize,
) -> Result<Vec<u8>> {
    Pbkdf2Params::new(iterations, output_len).derive(password, salt)
}

/// Derives `out.len()` bytes into a caller-owned buffer.
///
/// # Errors
///
/// Same as [`pbkdf2_sha256`], with the output length taken from `out`.
pub fn pbkdf2_sha256_into(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out: &mut [u8],
) -> Result<()> {
    let params = Pbkdf2Params::new(iterations, out.len());
    params.validate()?;

    derive(password, salt, &params, out);

    Ok(())
}

impl Pbkdf2Params {
    /// Runs PBKDF2-HMAC-SHA256 with these parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pbkdf2Params`](crate::Error::Pbkdf2Params) if the
    /// parameters fail [`validate`](Pbkdf2Params::validate).
    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
        self.validate()?;

        let mut out = with_available_factory(|factory| factory.get::<u8>(self.output_len));
        derive(password, salt, self, &mut out);

        Ok(out)
    }
}

fn derive(password: &[u8], salt: &[u8], params: &Pbkdf2Params, out: &mut [u8]) {
    debug!(
        "pbkdf2-sha256: {} iterations, {} output bytes in {} blocks",
        params.iterations,
        params.output_len,
        params.blocks()
    );

    // Keyed PRF, forked for every U_j.
    let prf = HmacSha256::new(password);

    // PRF after absorbing the salt, forked for every block index.
    let mut salted = prf.clone();
    salted.update(salt);

    let (mut u, mut t) = with_available_factory(|factory| {
        (
            factory.get::<u8>(DIGEST_LEN),
            factory.get::<u8>(DIGEST_LEN),
        )
    });

    for (index, chunk) in out.chunks_mut(DIGEST_LEN).enumerate() {
        // Block indices are 1-based; validation caps them below 2^32.
        let block_index = (index + 1) as u32;

        let mut mac = salted.clone();
        mac.update(&block_index.to_be_bytes());
        u.copy_from_slice(&mac.finalize());
        t.copy_from_slice(&u);

        for _ in 1..params.iterations {
            let mut mac = prf.clone();
            mac.update(&u);
            u.copy_from_slice(&mac.finalize());

            t.iter_mut().zip(u.iter()).for_each(|(t, u)| *t ^= u);
        }

        chunk.copy_from_slice(&t[..chunk.len()]);
    }

    wipe([Some(&mut u[..]), Some(&mut t[..])]);

    with_available_factory(|factory| {
        if let Err(err) = factory.recycle_all([u, t]) {
            warn!("pbkdf2 scratch not recycled: {err}");
        }
    });
}
