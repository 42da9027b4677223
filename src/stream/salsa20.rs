//! Salsa20 and HSalsa20 core functions
//!
//! This module provides the two fixed-size permutations NaCl builds on:
//!
//! - `salsa20`: the 64-byte Salsa20 block function, with feed-forward
//! - `hsalsa20`: the 32-byte key-derivation variant used to extend a
//!   24-byte nonce, without feed-forward
//!
//! Both are pure functions of a 16-byte input block, a 32-byte key and a
//! 16-byte constant. They hold no state and run in constant time.
//!
//! The slice-based entry points check every length and fail on mismatch;
//! the `_core` variants take arrays and cannot fail.

use crate::error::{Result, as_array, as_array_mut};

/// The NaCl Salsa20 constant, `"expand 32-byte k"`.
pub const SIGMA: [u8; 16] = *b"expand 32-byte k";

/// Rotation amounts of the quarter round, in application order.
const ROTATIONS: [u32; 4] = [7, 9, 13, 18];

/// Output positions of the HSalsa20 words: the diagonal, then the input block.
const HSALSA20_WORDS: [usize; 8] = [0, 5, 10, 15, 6, 7, 8, 9];

/// Performs one Salsa20 quarter round on `state[a..d]`.
///
/// ```text
/// b ^= (a + d) <<< 7
/// c ^= (b + a) <<< 9
/// d ^= (c + b) <<< 13
/// a ^= (d + c) <<< 18
/// ```
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[b] ^= state[a].wrapping_add(state[d]).rotate_left(ROTATIONS[0]);
    state[c] ^= state[b].wrapping_add(state[a]).rotate_left(ROTATIONS[1]);
    state[d] ^= state[c].wrapping_add(state[b]).rotate_left(ROTATIONS[2]);
    state[a] ^= state[d].wrapping_add(state[c]).rotate_left(ROTATIONS[3]);
}

/// Applies the full 20-round Salsa20 permutation in place.
///
/// Each of the 10 double rounds mixes the four columns of the 4×4 state
/// matrix, then its four rows.
pub(crate) fn rounds(state: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column round
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 5, 9, 13, 1);
        quarter_round(state, 10, 14, 2, 6);
        quarter_round(state, 15, 3, 7, 11);

        // Row round
        quarter_round(state, 0, 1, 2, 3);
        quarter_round(state, 5, 6, 7, 4);
        quarter_round(state, 10, 11, 8, 9);
        quarter_round(state, 15, 12, 13, 14);
    }
}

#[inline(always)]
fn load_words(dst: &mut [u32], src: &[u8]) {
    dst.iter_mut()
        .zip(src.chunks_exact(4))
        .for_each(|(w, b)| *w = u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
}

/// Builds the initial state matrix.
///
/// Layout (word index → source):
///
/// ```text
///  0: c[0]   1: k[0]   2: k[1]   3: k[2]
///  4: k[3]   5: c[1]   6: in[0]  7: in[1]
///  8: in[2]  9: in[3] 10: c[2]  11: k[4]
/// 12: k[5]  13: k[6]  14: k[7]  15: c[3]
/// ```
fn setup(block: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u32; 16] {
    let mut c = [0u32; 4];
    load_words(&mut c, constant);

    let mut state = [0u32; 16];
    state[0] = c[0];
    state[5] = c[1];
    state[10] = c[2];
    state[15] = c[3];

    load_words(&mut state[1..5], &key[..16]);
    load_words(&mut state[6..10], block);
    load_words(&mut state[11..15], &key[16..]);

    state
}

/// Computes one 64-byte Salsa20 block.
///
/// The input words are added back to the permuted state before
/// serialization (feed-forward).
pub fn salsa20_core(block: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 64] {
    let original = setup(block, key, constant);
    let mut state = original;

    rounds(&mut state);

    state.iter_mut().zip(&original).for_each(|(s, o)| {
        *s = s.wrapping_add(*o);
    });

    let mut out = [0u8; 64];
    out.chunks_exact_mut(4)
        .zip(&state)
        .for_each(|(chunk, word)| chunk.copy_from_slice(&word.to_le_bytes()));

    out
}

/// Computes the 32-byte HSalsa20 output.
///
/// No feed-forward is applied; the diagonal words (0, 5, 10, 15) and the
/// words that held the input block (6..=9) are serialized in that order.
pub fn hsalsa20_core(block: &[u8; 16], key: &[u8; 32], constant: &[u8; 16]) -> [u8; 32] {
    let mut state = setup(block, key, constant);

    rounds(&mut state);

    let mut out = [0u8; 32];
    out.chunks_exact_mut(4)
        .zip(HSALSA20_WORDS)
        .for_each(|(chunk, index)| chunk.copy_from_slice(&state[index].to_le_bytes()));

    out
}

/// Salsa20 block function over caller-supplied buffers.
///
/// # Errors
///
/// Fails with [`Error::InvalidLength`](crate::Error::InvalidLength) unless
/// `out` is 64 bytes, `block` 16, `key` 32 and `constant` 16.
pub fn salsa20(out: &mut [u8], block: &[u8], key: &[u8], constant: &[u8]) -> Result<()> {
    let out = as_array_mut::<64>("salsa20 output", out)?;
    let block = as_array::<16>("salsa20 input block", block)?;
    let key = as_array::<32>("salsa20 key", key)?;
    let constant = as_array::<16>("salsa20 constant", constant)?;

    *out = salsa20_core(block, key, constant);

    Ok(())
}

/// HSalsa20 over caller-supplied buffers.
///
/// # Errors
///
/// Fails with [`Error::InvalidLength`](crate::Error::InvalidLength) unless
/// `out` is 32 bytes, `block` 16, `key` 32 and `constant` 16.
pub fn hsalsa20(out: &mut [u8], block: &[u8], key: &[u8], constant: &[u8]) -> Result<()> {
    let out = as_array_mut::<32>("hsalsa20 output", out)?;
    let block = as_array::<16>("hsalsa20 input block", block)?;
    let key = as_array::<32>("hsalsa20 key", key)?;
    let constant = as_array::<16>("hsalsa20 constant", constant)?;

    *out = hsalsa20_core(block, key, constant);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_round_matches_reference_example() {
        // Salsa20 specification, quarterround(1, 0, 0, 0).
        let mut state = [0u32; 16];
        state[0] = 1;
        quarter_round(&mut state, 0, 1, 2, 3);

        assert_eq!(&state[..4], &[0x08008145, 0x00000080, 0x00010200, 0x20500000]);
    }

    #[test]
    fn setup_places_constant_on_diagonal() {
        let state = setup(&[0u8; 16], &[0u8; 32], &SIGMA);

        assert_eq!(state[0], 0x6170_7865);
        assert_eq!(state[5], 0x3320_646e);
        assert_eq!(state[10], 0x7962_2d32);
        assert_eq!(state[15], 0x6b20_6574);
    }
}
