//! Salsa20 and XSalsa20 keystream XOR.
//!
//! These are the direct consumers of the core functions: Salsa20 with an
//! 8-byte nonce and a 64-bit little-endian block counter, and XSalsa20, which
//! first derives a subkey with HSalsa20 from the first 16 nonce bytes and
//! then runs Salsa20 with the last 8.
//!
//! Encryption and decryption are the same operation. Reusing a
//! `(key, nonce)` pair is catastrophic and must be prevented by callers.

use zeroize::Zeroize;

use super::salsa20::{SIGMA, hsalsa20_core, salsa20_core};
use crate::error::{Result, as_array};

/// XORs `data` in place with the Salsa20 keystream for `(nonce, key)`.
///
/// The keystream starts at block counter 0.
pub fn salsa20_xor_in_place(data: &mut [u8], nonce: &[u8; 8], key: &[u8; 32]) {
    let mut input = [0u8; 16];
    input[..8].copy_from_slice(nonce);

    let mut counter = 0u64;

    for chunk in data.chunks_mut(64) {
        input[8..].copy_from_slice(&counter.to_le_bytes());

        let mut block = salsa20_core(&input, key, &SIGMA);
        chunk.iter_mut().zip(&block).for_each(|(d, k)| *d ^= k);
        block.zeroize();

        counter = counter.wrapping_add(1);
    }
}

/// XORs `data` in place with the XSalsa20 keystream for `(nonce, key)`.
pub fn xsalsa20_xor_in_place(data: &mut [u8], nonce: &[u8; 24], key: &[u8; 32]) {
    let mut prefix = [0u8; 16];
    prefix.copy_from_slice(&nonce[..16]);

    let mut subkey = hsalsa20_core(&prefix, key, &SIGMA);

    let mut tail = [0u8; 8];
    tail.copy_from_slice(&nonce[16..]);

    salsa20_xor_in_place(data, &tail, &subkey);
    subkey.zeroize();
}

/// Returns `message` XORed with the Salsa20 keystream.
///
/// # Errors
///
/// Fails if `nonce` is not 8 bytes or `key` is not 32 bytes.
pub fn salsa20_xor(message: &[u8], nonce: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let nonce = as_array::<8>("salsa20 nonce", nonce)?;
    let key = as_array::<32>("salsa20 key", key)?;

    let mut out = message.to_vec();
    salsa20_xor_in_place(&mut out, nonce, key);

    Ok(out)
}

/// Returns `message` XORed with the XSalsa20 keystream.
///
/// # Errors
///
/// Fails if `nonce` is not 24 bytes or `key` is not 32 bytes.
pub fn xsalsa20_xor(message: &[u8], nonce: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let nonce = as_array::<24>("xsalsa20 nonce", nonce)?;
    let key = as_array::<32>("xsalsa20 key", key)?;

    let mut out = message.to_vec();
    xsalsa20_xor_in_place(&mut out, nonce, key);

    Ok(out)
}
