//! Scalar arithmetic modulo the Ed25519 group order.
//!
//! Scalars are integers modulo
//!
//! ```text
//! ℓ = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! stored as 32 byte-valued `u32` limbs, little-endian. Every operation
//! returning a [`Scalar`] leaves it fully reduced below `ℓ`, except
//! [`Scalar::sub_nored`].
//!
//! ## Algorithms
//!
//! Wide values (up to 512 bits) are reduced with Barrett reduction
//! (Handbook of Applied Cryptography, Algorithm 14.42) using the 33-byte
//! constant `μ = ⌊2^528 / ℓ⌋`. The estimate may exceed the true remainder by
//! up to two multiples of `ℓ`; two masked conditional subtractions finish
//! the job without branching.
//!
//! [`Scalar::window3`] and [`Scalar::interleave2`] recode scalars into the
//! digit formats consumed by fixed-window and double-scalar multiplication.
//! They are layout transforms only and never reduce.
//!
//! ## Security properties
//!
//! Reduction, addition and multiplication are constant-time. Functions
//! carrying a `_vartime` suffix branch on their inputs and must only see
//! public values.

use std::cmp::Ordering;
use std::ops::{Add, Mul};

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::error::{Error, Result, as_array};

/// Length of an encoded scalar.
pub const SCALAR_BYTES: usize = 32;

/// Length of an encoded short scalar.
pub const SHORT_SCALAR_BYTES: usize = 16;

/// Number of signed base-8 digits produced by [`Scalar::window3`].
pub const WINDOW3_DIGITS: usize = 85;

/// Number of digit pairs produced by [`Scalar::interleave2`].
pub const INTERLEAVE2_DIGITS: usize = 128;

/// The group order ℓ, little-endian.
pub const ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

const M: [u32; 32] = {
    let mut m = [0u32; 32];
    let mut i = 0;
    while i < 32 {
        m[i] = ORDER[i] as u32;
        i += 1;
    }
    m
};

/// ⌊2^528 / ℓ⌋, little-endian.
const MU: [u32; 33] = [
    0x1b, 0x13, 0x2c, 0x0a, 0xa3, 0xe5, 0x9c, 0xed, 0xa7, 0x29, 0x63, 0x08, 0x5d, 0x21, 0x06, 0x21,
    0xeb, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x0f,
];

/// A scalar modulo ℓ.
#[derive(Clone, Copy, Default)]
pub struct Scalar(pub(crate) [u32; 32]);

/// A 128-bit scalar, used as the short multiplier in batch verification.
#[derive(Clone, Copy, Default)]
pub struct ShortScalar(pub(crate) [u32; 16]);

/// `1` when `a < b`, else `0`. Inputs must fit in 16 bits.
#[inline(always)]
fn lt(a: u32, b: u32) -> u32 {
    a.wrapping_sub(b) >> 31
}

/// Subtracts ℓ under a mask when `v >= ℓ`. Limbs must be bytes.
fn reduce_add_sub(v: &mut [u32; 32]) {
    let mut pb = 0u32;
    let mut b = 0u32;
    let mut t = [0u8; 32];

    for i in 0..32 {
        pb += M[i];
        b = lt(v[i], pb);
        t[i] = v[i].wrapping_sub(pb).wrapping_add(b << 8) as u8;
        pb = b;
    }

    // b == 1 means v < ℓ: keep v.
    let mask = b.wrapping_sub(1);
    for (cell, &t) in v.iter_mut().zip(t.iter()) {
        *cell ^= mask & (*cell ^ t as u32);
    }
}

/// Reduces a 512-bit value held in 64 byte-valued limbs modulo ℓ.
fn barrett_reduce(x: &[u32; 64]) -> [u32; 32] {
    let mut q2 = [0u32; 66];

    // q1 = x >> 248, q2 = q1 · μ. Only limbs 31 and up feed q3.
    for i in 0..33 {
        for j in 0..33 {
            if i + j >= 31 {
                q2[i + j] += MU[i] * x[j + 31];
            }
        }
    }
    q2[32] += q2[31] >> 8;
    q2[33] += q2[32] >> 8;

    // q3 = q2 >> 264
    let q3 = &q2[33..];

    // r2 = q3 · ℓ mod 2^264
    let mut r2 = [0u32; 33];
    for i in 0..32 {
        for j in 0..33 {
            if i + j < 33 {
                r2[i + j] += M[i] * q3[j];
            }
        }
    }

    for i in 0..32 {
        r2[i + 1] += r2[i] >> 8;
        r2[i] &= 0xff;
    }

    // r = r1 - r2 with r1 = x mod 2^264
    let mut r = [0u32; 32];
    let mut pb = 0u32;
    for i in 0..32 {
        pb += r2[i];
        let b = lt(x[i], pb);
        r[i] = x[i].wrapping_sub(pb).wrapping_add(b << 8);
        pb = b;
    }

    reduce_add_sub(&mut r);
    reduce_add_sub(&mut r);

    r
}

impl Scalar {
    /// The scalar 0.
    pub const ZERO: Self = Scalar([0; 32]);

    /// Reduces a 256-bit little-endian integer modulo ℓ.
    pub fn from_32_bytes(bytes: &[u8; 32]) -> Self {
        let mut t = [0u32; 64];
        for (cell, &byte) in t.iter_mut().zip(bytes.iter()) {
            *cell = byte as u32;
        }

        let r = Scalar(barrett_reduce(&t));
        t.zeroize();

        r
    }

    /// Reduces a 512-bit little-endian integer modulo ℓ, typically a
    /// SHA-512 digest.
    pub fn from_64_bytes(bytes: &[u8; 64]) -> Self {
        let mut t = bytes.map(u32::from);

        let r = Scalar(barrett_reduce(&t));
        t.zeroize();

        r
    }

    /// Widens a 128-bit scalar. The result is already below ℓ.
    pub fn from_short(short: &ShortScalar) -> Self {
        let mut v = [0u32; 32];
        v[..16].copy_from_slice(&short.0);

        Scalar(v)
    }

    /// Little-endian encoding.
    pub fn to_32_bytes(&self) -> [u8; 32] {
        self.0.map(|limb| limb as u8)
    }

    /// `true` if every limb is zero.
    pub fn is_zero_vartime(&self) -> bool {
        self.0.iter().all(|&limb| limb == 0)
    }

    /// `true` if the value fits in 128 bits.
    pub fn is_short_vartime(&self) -> bool {
        self.0[16..].iter().all(|&limb| limb == 0)
    }

    /// `true` if `self < other` as integers.
    pub fn lt_vartime(&self, other: &Self) -> bool {
        for i in (0..32).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Less => return true,
                Ordering::Greater => return false,
                Ordering::Equal => {}
            }
        }

        false
    }

    /// `self - rhs mod 2^256`, without reduction modulo ℓ.
    ///
    /// Only meaningful when `self >= rhs`.
    pub fn sub_nored(&self, rhs: &Self) -> Self {
        let mut r = [0u32; 32];
        let mut b = 0u32;

        for (i, limb) in r.iter_mut().enumerate() {
            let t = self.0[i].wrapping_sub(rhs.0[i]).wrapping_sub(b);
            *limb = t & 0xff;
            b = (t >> 8) & 1;
        }

        Scalar(r)
    }

    /// `self · rhs mod ℓ` for a 128-bit `rhs`.
    pub fn mul_short(&self, rhs: &ShortScalar) -> Self {
        *self * Scalar::from_short(rhs)
    }

    /// Recodes the scalar into 85 signed base-8 digits in `-4..=3`.
    ///
    /// `self = Σ r[i] · 8^i`. Requires a reduced scalar.
    pub fn window3(&self) -> [i8; WINDOW3_DIGITS] {
        let v = &self.0;
        let mut r = [0i32; WINDOW3_DIGITS];

        // Every 3 bytes yield 8 digits; the final 2 bytes yield 5.
        for i in 0..11 {
            let b0 = v[3 * i] as i32;
            let b1 = v[3 * i + 1] as i32;

            r[8 * i] = b0 & 7;
            r[8 * i + 1] = (b0 >> 3) & 7;
            r[8 * i + 2] = ((b0 >> 6) & 7) ^ ((b1 << 2) & 7);
            r[8 * i + 3] = (b1 >> 1) & 7;
            r[8 * i + 4] = (b1 >> 4) & 7;

            if i == 10 {
                break;
            }

            let b2 = v[3 * i + 2] as i32;
            r[8 * i + 5] = ((b1 >> 7) & 7) ^ ((b2 << 1) & 7);
            r[8 * i + 6] = (b2 >> 2) & 7;
            r[8 * i + 7] = (b2 >> 5) & 7;
        }

        // Shift each digit into -4..=3, pushing the excess upward.
        let mut carry = 0;
        for i in 0..WINDOW3_DIGITS - 1 {
            r[i] += carry;
            r[i + 1] += r[i] >> 3;
            r[i] &= 7;
            carry = r[i] >> 2;
            r[i] -= carry << 3;
        }
        r[WINDOW3_DIGITS - 1] += carry;

        r.map(|digit| digit as i8)
    }

    /// Interleaves the base-4 digits of two scalars.
    ///
    /// Digit `k` carries the `k`-th 2-bit digit of `s1` in its low two bits
    /// and that of `s2` in bits 2 and 3.
    pub fn interleave2(s1: &Self, s2: &Self) -> [u8; INTERLEAVE2_DIGITS] {
        let mut r = [0u8; INTERLEAVE2_DIGITS];

        for i in 0..32 {
            for k in 0..4 {
                let shift = 2 * k;
                let d1 = (s1.0[i] >> shift) & 3;
                let d2 = (s2.0[i] >> shift) & 3;

                r[4 * i + k] = (d1 ^ (d2 << 2)) as u8;
            }
        }

        r
    }
}

impl ShortScalar {
    /// Loads a 128-bit little-endian integer.
    pub fn from_16_bytes(bytes: &[u8; 16]) -> Self {
        ShortScalar(bytes.map(u32::from))
    }

    /// Slice form of [`from_16_bytes`](Self::from_16_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `bytes` is 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_16_bytes(as_array::<SHORT_SCALAR_BYTES>(
            "short scalar",
            bytes,
        )?))
    }
}

impl TryFrom<&[u8]> for Scalar {
    type Error = Error;

    /// Reduces a 32- or 64-byte little-endian integer modulo ℓ.
    fn try_from(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            64 => Ok(Scalar::from_64_bytes(as_array::<64>("wide scalar", bytes)?)),
            _ => Ok(Scalar::from_32_bytes(as_array::<SCALAR_BYTES>(
                "scalar", bytes,
            )?)),
        }
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_32_bytes()[..].ct_eq(&other.to_32_bytes()[..])
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Zeroize for ShortScalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// `self + rhs mod ℓ`. Both operands must be reduced.
impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut r = [0u32; 32];
        for (i, limb) in r.iter_mut().enumerate() {
            *limb = self.0[i] + rhs.0[i];
        }

        for i in 0..31 {
            r[i + 1] += r[i] >> 8;
            r[i] &= 0xff;
        }
        reduce_add_sub(&mut r);

        Scalar(r)
    }
}

/// `self · rhs mod ℓ`.
impl Mul for Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut t = [0u32; 64];

        for i in 0..32 {
            for j in 0..32 {
                t[i + j] += self.0[i] * rhs.0[j];
            }
        }

        for i in 0..63 {
            t[i + 1] += t[i] >> 8;
            t[i] &= 0xff;
        }

        let r = Scalar(barrett_reduce(&t));
        t.zeroize();

        r
    }
}
