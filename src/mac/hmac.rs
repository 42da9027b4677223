//! HMAC-SHA256 (RFC 2104).
//!
//! The context is a pair of SHA-256 contexts: the inner one is seeded with
//! `key ⊕ ipad` and absorbs the message, the outer one is seeded with
//! `key ⊕ opad` and absorbs the inner digest at finalization.

use zeroize::Zeroize;

use crate::hash::sha256::{BLOCK_LEN, DIGEST_LEN, Sha256, sha256};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Streaming HMAC-SHA256 context.
///
/// Cloning deep-copies both inner and outer state, so a keyed context can be
/// forked and fed different suffixes.
#[derive(Clone)]
pub struct HmacSha256 {
    inner: Sha256,
    outer: Sha256,
}

impl HmacSha256 {
    /// Creates a context keyed with `key`.
    ///
    /// Keys longer than one block are replaced by their SHA-256 digest.
    pub fn new(key: &[u8]) -> Self {
        let mut block = [0u8; BLOCK_LEN];

        if key.len() > BLOCK_LEN {
            let mut digest = sha256(key);
            block[..DIGEST_LEN].copy_from_slice(&digest);
            digest.zeroize();
        } else {
            block[..key.len()].copy_from_slice(key);
        }

        let mut pad = [0u8; BLOCK_LEN];

        pad.iter_mut().zip(&block).for_each(|(p, k)| *p = k ^ IPAD);
        let mut inner = Sha256::new();
        inner.update(&pad);

        pad.iter_mut().zip(&block).for_each(|(p, k)| *p = k ^ OPAD);
        let mut outer = Sha256::new();
        outer.update(&pad);

        pad.zeroize();
        block.zeroize();

        Self { inner, outer }
    }

    /// Absorbs message bytes into the inner context.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Returns the 32-byte MAC.
    ///
    /// Both contexts are consumed by finalization; the HMAC context must be
    /// re-keyed (or cloned from a keyed prefix) before reuse.
    pub fn finalize(mut self) -> [u8; DIGEST_LEN] {
        let mut inner = self.inner.finalize();

        self.outer.update(&inner);
        inner.zeroize();

        self.outer.finalize()
    }
}

/// Computes HMAC-SHA256 of `data` under `key`.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut mac = HmacSha256::new(key);
    mac.update(data);
    mac.finalize()
}
