//! Finite field arithmetic modulo `p = 2²⁵⁵ − 19`.
//!
//! ## Representation
//!
//! A field element is 32 cells of `u32`, each nominally holding one byte of
//! the little-endian value:
//!
//! ```text
//! x = v[0] + v[1]·2⁸ + ... + v[31]·2²⁴⁸
//! ```
//!
//! Cells may temporarily exceed 8 bits while an operation runs. Every public
//! operation ends with a carry pass that brings cells 0..=30 back to
//! `0..=255` and keeps cell 31 at most 128, so the next multiplication
//! cannot overflow a `u32` accumulator.
//!
//! The value is *redundant* between operations: it is congruent to the
//! intended residue but not necessarily below `p`. [`FieldElement::freeze`]
//! produces the canonical residue; [`pack`](FieldElement::pack),
//! [`parity`](FieldElement::parity) and every comparison freeze first.
//!
//! Overflow above bit 255 is folded back with `2²⁵⁵ ≡ 19 (mod p)`; the
//! overflow of a 512-bit product is folded with `2²⁵⁶ ≡ 38 (mod p)`.
//!
//! ## Constant time
//!
//! Everything here except [`FieldElement::iseq_vartime`] runs in time
//! independent of the cell values. Constant-time equality is available
//! through [`subtle::ConstantTimeEq`].

use std::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::error::{Result, as_array};

/// Length of a packed field element.
pub const FIELD_BYTES: usize = 32;

/// Field element modulo `2^255 - 19` in 32 byte-sized cells.
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) [u32; 32]);

/// `1` when `a == b`, else `0`. Inputs must fit in 16 bits.
#[inline(always)]
fn equal(a: u32, b: u32) -> u32 {
    (a ^ b).wrapping_sub(1) >> 31
}

/// `1` when `a >= b`, else `0`. Inputs must fit in 16 bits.
#[inline(always)]
fn ge(a: u32, b: u32) -> u32 {
    (a.wrapping_sub(b) >> 31) ^ 1
}

#[inline(always)]
fn times19(a: u32) -> u32 {
    (a << 4) + (a << 1) + a
}

#[inline(always)]
fn times38(a: u32) -> u32 {
    (a << 5) + (a << 2) + (a << 1)
}

/// Folds bits above 2²⁵⁵ into cell 0 and carries every cell down to 8 bits,
/// `passes` times.
#[inline(always)]
fn carry_passes(v: &mut [u32; 32], passes: usize) {
    for _ in 0..passes {
        let t = v[31] >> 7;
        v[31] &= 127;
        v[0] += times19(t);

        for i in 0..31 {
            v[i + 1] += v[i] >> 8;
            v[i] &= 255;
        }
    }
}

/// Reduction after addition or subtraction.
#[inline(always)]
fn reduce_add_sub(v: &mut [u32; 32]) {
    carry_passes(v, 4);
}

/// Reduction after multiplication.
#[inline(always)]
fn reduce_mul(v: &mut [u32; 32]) {
    carry_passes(v, 2);
}

impl FieldElement {
    /// The additive identity (0).
    pub const ZERO: Self = FieldElement([0; 32]);

    /// The multiplicative identity (1).
    pub const ONE: Self = {
        let mut v = [0; 32];
        v[0] = 1;
        FieldElement(v)
    };

    /// Decodes 32 little-endian bytes. Bit 255 is ignored.
    ///
    /// Values in `p..2^255` are accepted and stay redundant until frozen.
    pub fn unpack(bytes: &[u8; 32]) -> Self {
        let mut v = bytes.map(u32::from);
        v[31] &= 127;

        FieldElement(v)
    }

    /// Slice form of [`unpack`](Self::unpack).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`](crate::Error::InvalidLength) unless
    /// `bytes` is exactly 32 bytes long.
    pub fn unpack_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self::unpack(as_array::<FIELD_BYTES>("field element", bytes)?))
    }

    /// Canonical 32-byte little-endian encoding.
    pub fn pack(&self) -> [u8; 32] {
        let mut t = *self;
        t.freeze();

        t.0.map(|cell| cell as u8)
    }

    /// Reduces `self` in place to the unique representative in `0..p`.
    ///
    /// Carries the cells down to bytes first, then subtracts `p` under a
    /// mask when the value lies in `p..2^255`.
    pub fn freeze(&mut self) {
        let v = &mut self.0;
        reduce_add_sub(v);

        let mut m = equal(v[31], 127);
        for i in (1..31).rev() {
            m &= equal(v[i], 255);
        }
        m &= ge(v[0], 237);

        let m = m.wrapping_neg();

        v[31] -= m & 127;
        for cell in v[1..31].iter_mut() {
            *cell -= m & 255;
        }
        v[0] -= m & 237;
    }

    /// Returns `1` if the canonical value is zero.
    pub fn is_zero(&self) -> Choice {
        let mut t = *self;
        t.freeze();

        let r = t.0.iter().fold(1, |acc, &cell| acc & equal(cell, 0));

        Choice::from(r as u8)
    }

    /// Variable-time equality of two *public* values.
    ///
    /// Returns as soon as a cell differs. Use [`ConstantTimeEq::ct_eq`] for
    /// anything derived from secret data.
    pub fn iseq_vartime(&self, other: &Self) -> bool {
        let mut a = *self;
        let mut b = *other;
        a.freeze();
        b.freeze();

        for i in 0..32 {
            if a.0[i] != b.0[i] {
                return false;
            }
        }

        true
    }

    /// Constant-time conditional move.
    ///
    /// Replaces `self` with `x` when `bit == 1`, leaves it unchanged when
    /// `bit == 0`. Any other value of `bit` is a caller error.
    pub fn cmov(&mut self, x: &Self, bit: u8) {
        let mask = (bit as u32).wrapping_neg();

        for (r, x) in self.0.iter_mut().zip(x.0.iter()) {
            *r ^= mask & (x ^ *r);
        }
    }

    /// Lowest bit of the canonical value.
    pub fn parity(&self) -> u8 {
        let mut t = *self;
        t.freeze();

        (t.0[0] & 1) as u8
    }

    pub(crate) fn add_cells(&self, rhs: &Self) -> Self {
        let mut r = [0u32; 32];
        for (i, cell) in r.iter_mut().enumerate() {
            *cell = self.0[i] + rhs.0[i];
        }
        reduce_add_sub(&mut r);

        FieldElement(r)
    }

    pub(crate) fn sub_cells(&self, rhs: &Self) -> Self {
        // Pre-add 2p in cell form so no cell can go negative.
        let mut t = [0u32; 32];
        t[0] = self.0[0] + 0x1da;
        for i in 1..31 {
            t[i] = self.0[i] + 0x1fe;
        }
        t[31] = self.0[31] + 0xfe;

        for (cell, y) in t.iter_mut().zip(rhs.0.iter()) {
            *cell -= y;
        }
        reduce_add_sub(&mut t);

        FieldElement(t)
    }

    pub(crate) fn mul_cells(&self, rhs: &Self) -> Self {
        let mut t = [0u32; 63];

        for i in 0..32 {
            for j in 0..32 {
                t[i + j] += self.0[i] * rhs.0[j];
            }
        }

        let mut r = [0u32; 32];
        for i in 32..63 {
            r[i - 32] = t[i - 32] + times38(t[i]);
        }
        r[31] = t[31];
        reduce_mul(&mut r);

        FieldElement(r)
    }

    /// Computes `self²`.
    pub fn square(&self) -> Self {
        self.mul_cells(self)
    }

    /// Squares `self` `n` times.
    pub(crate) fn n_square(&self, n: usize) -> Self {
        let mut t = *self;
        for _ in 0..n {
            t = t.square();
        }

        t
    }

    /// Shared prefix of the inversion and square-root chains.
    ///
    /// Returns `(self^(2^250 - 1), self^11)`.
    fn pow2_250_1(&self) -> (Self, Self) {
        let z2 = self.square(); // 2
        let t = z2.n_square(2); // 8
        let z9 = t * *self; // 9
        let z11 = z9 * z2; // 11
        let t = z11.square(); // 22
        let z2_5_0 = t * z9; // 2^5 - 2^0

        let t = z2_5_0.n_square(5); // 2^10 - 2^5
        let z2_10_0 = t * z2_5_0; // 2^10 - 2^0

        let t = z2_10_0.n_square(10); // 2^20 - 2^10
        let z2_20_0 = t * z2_10_0; // 2^20 - 2^0

        let t = z2_20_0.n_square(20); // 2^40 - 2^20
        let t = t * z2_20_0; // 2^40 - 2^0

        let t = t.n_square(10); // 2^50 - 2^10
        let z2_50_0 = t * z2_10_0; // 2^50 - 2^0

        let t = z2_50_0.n_square(50); // 2^100 - 2^50
        let z2_100_0 = t * z2_50_0; // 2^100 - 2^0

        let t = z2_100_0.n_square(100); // 2^200 - 2^100
        let t = t * z2_100_0; // 2^200 - 2^0

        let t = t.n_square(50); // 2^250 - 2^50
        let z2_250_0 = t * z2_50_0; // 2^250 - 2^0

        (z2_250_0, z11)
    }

    /// Multiplicative inverse `self^(p - 2)`. The inverse of zero is zero.
    pub fn invert(&self) -> Self {
        let (t, z11) = self.pow2_250_1();

        let t = t.n_square(5); // 2^255 - 2^5

        t * z11 // 2^255 - 21
    }

    /// Computes `self^((p - 5) / 8) = self^(2^252 - 3)`, used for square
    /// roots during point decompression.
    pub fn pow2523(&self) -> Self {
        let (t, _) = self.pow2_250_1();

        let t = t.n_square(2); // 2^252 - 2^2

        t * *self // 2^252 - 3
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.pack()[..].ct_eq(&other.pack()[..])
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut r = *a;
        r.cmov(b, choice.unwrap_u8());

        r
    }
}

/// Field addition, carried back to byte cells.
impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_cells(&rhs)
    }
}

/// Field subtraction, carried back to byte cells.
impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_cells(&rhs)
    }
}

/// Field multiplication, carried back to byte cells.
impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_cells(&rhs)
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self::Output {
        FieldElement::ZERO.sub_cells(&self)
    }
}
