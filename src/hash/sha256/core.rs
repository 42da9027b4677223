//! SHA-256 core hashing functions
//!
//! This module provides:
//! - the compression function operating on 512-bit blocks
//! - a streaming context, [`Sha256`], that buffers partial blocks across
//!   `update` calls
//! - a one-shot [`sha256`] function
//!
//! The context is `Clone`, and a clone is fully independent. HMAC and PBKDF2
//! rely on this to fork a keyed prefix state instead of recomputing it.

use zeroize::Zeroize;

use super::H256_INIT;
use super::computations::{all_rounds, schedule};

/// Size of one compression block in bytes.
pub const BLOCK_LEN: usize = 64;

/// Size of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Compresses a single 512-bit message block into `state`.
#[inline(always)]
pub fn compress(block: &[u8; 64], state: &mut [u32; 8]) {
    let w = schedule(block);
    all_rounds(state, &w);
}

/// Streaming SHA-256 context.
///
/// ```
/// use saltcore::hash::Sha256;
///
/// let mut ctx = Sha256::new();
/// ctx.update(b"ab");
/// ctx.update(b"c");
///
/// assert_eq!(ctx.finalize(), saltcore::hash::sha256(b"abc"));
/// ```
#[derive(Clone)]
pub struct Sha256 {
    /// Running hash state.
    state: [u32; 8],

    /// Pending bytes of an incomplete block.
    buffer: [u8; BLOCK_LEN],

    /// Number of valid bytes in `buffer` (0..=63).
    buffered: usize,

    /// Total number of bytes absorbed so far.
    length: u64,
}

impl Sha256 {
    /// Creates a context loaded with the SHA-256 initial value.
    pub fn new() -> Self {
        Self {
            state: H256_INIT,
            buffer: [0u8; BLOCK_LEN],
            buffered: 0,
            length: 0,
        }
    }

    /// Absorbs `data`.
    ///
    /// Any split of a message across calls, including empty calls, yields
    /// the same digest as a single call.
    pub fn update(&mut self, mut data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u64);

        // Complete a straddled block first.
        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_LEN {
                return;
            }

            compress(&self.buffer, &mut self.state);
            self.buffered = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            let block: &[u8; BLOCK_LEN] = block.try_into().expect("chunk is one block");
            compress(block, &mut self.state);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Applies the final padding and returns the digest.
    ///
    /// The context is reset to its initial state afterwards and can be
    /// reused for a new message.
    pub fn finalize(&mut self) -> [u8; DIGEST_LEN] {
        let bit_len = self.length.wrapping_mul(8);
        let rem = self.buffered;

        let mut block = [0u8; BLOCK_LEN];
        block[..rem].copy_from_slice(&self.buffer[..rem]);
        block[rem] = 0x80;

        // No room left for the 64-bit length field.
        if rem > 55 {
            compress(&block, &mut self.state);
            block = [0u8; BLOCK_LEN];
        }

        block[56..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&block, &mut self.state);

        let mut out = [0u8; DIGEST_LEN];
        out.chunks_exact_mut(4)
            .zip(&self.state)
            .for_each(|(chunk, word)| chunk.copy_from_slice(&word.to_be_bytes()));

        block.zeroize();
        self.reset();

        out
    }

    /// Discards all absorbed input.
    pub fn reset(&mut self) {
        self.buffer.zeroize();
        self.state = H256_INIT;
        self.buffered = 0;
        self.length = 0;
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Sha256 {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
    }
}

/// Computes the SHA-256 digest of `input`.
pub fn sha256(input: &[u8]) -> [u8; DIGEST_LEN] {
    let mut ctx = Sha256::new();
    ctx.update(input);
    ctx.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straddled_block_is_resumed() {
        let data = [0x5au8; 130];

        let mut ctx = Sha256::new();
        ctx.update(&data[..63]);
        assert_eq!(ctx.buffered, 63);

        ctx.update(&data[63..65]);
        assert_eq!(ctx.buffered, 1);

        ctx.update(&data[65..]);
        assert_eq!(ctx.buffered, 2);
        assert_eq!(ctx.length, 130);

        assert_eq!(ctx.finalize(), sha256(&data));
    }

    #[test]
    fn finalize_resets_context() {
        let mut ctx = Sha256::new();
        ctx.update(b"first message");
        let _ = ctx.finalize();

        ctx.update(b"abc");
        assert_eq!(ctx.finalize(), sha256(b"abc"));
    }
}
