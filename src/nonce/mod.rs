//! Counter arithmetic on 24-byte nonces.
//!
//! A nonce is read as three independent little-endian 64-bit lanes:
//!
//! ```text
//! bytes  0..8   lane 0
//! bytes  8..16  lane 1
//! bytes 16..24  lane 2
//! ```
//!
//! Advancing a nonce by `delta` adds `delta` to every lane modulo `2^64`.
//! Lanes never carry into each other, so two nonces derived from the same
//! initial value differ by the same amount in each lane. That is what
//! [`calculate_delta`] checks.

use crate::error::{Error, Result, as_array, as_array_mut};

/// Length of a nonce in bytes.
pub const NONCE_BYTES: usize = 24;

/// Largest delta accepted by [`advance`].
pub const MAX_ADVANCE: u32 = 255;

const LANES: usize = 3;

fn read_lanes(bytes: &[u8; NONCE_BYTES]) -> [u64; LANES] {
    let mut lanes = [0u64; LANES];

    for (lane, chunk) in lanes.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *lane = u64::from_le_bytes(word);
    }

    lanes
}

fn write_lanes(bytes: &mut [u8; NONCE_BYTES], lanes: &[u64; LANES]) {
    for (chunk, lane) in bytes.chunks_exact_mut(8).zip(lanes.iter()) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
}

fn add_to_lanes(bytes: &mut [u8; NONCE_BYTES], delta: u64) {
    let mut lanes = read_lanes(bytes);
    for lane in lanes.iter_mut() {
        *lane = lane.wrapping_add(delta);
    }

    write_lanes(bytes, &lanes);
}

/// Adds `delta` to each lane of `nonce` in place.
///
/// # Errors
///
/// - [`Error::InvalidLength`] if `nonce` is not 24 bytes long
/// - [`Error::DeltaOutOfRange`] unless `1 <= delta <= 255`
pub fn advance(nonce: &mut [u8], delta: u32) -> Result<()> {
    if !(1..=MAX_ADVANCE).contains(&delta) {
        return Err(Error::DeltaOutOfRange(delta));
    }

    let nonce = as_array_mut::<NONCE_BYTES>("nonce", nonce)?;
    add_to_lanes(nonce, u64::from(delta));

    Ok(())
}

/// Advances by one, giving the next odd step of a counter started at an
/// odd value.
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] if `nonce` is not 24 bytes long.
pub fn advance_oddly(nonce: &mut [u8]) -> Result<()> {
    advance(nonce, 1)
}

/// Advances by two, keeping the parity of every lane.
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] if `nonce` is not 24 bytes long.
pub fn advance_evenly(nonce: &mut [u8]) -> Result<()> {
    advance(nonce, 2)
}

/// Returns `initial` advanced by an arbitrary 64-bit `delta`, leaving
/// `initial` untouched.
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] if `initial` is not 24 bytes long.
pub fn calculate_nonce(initial: &[u8], delta: u64) -> Result<[u8; NONCE_BYTES]> {
    let mut nonce = *as_array::<NONCE_BYTES>("nonce", initial)?;
    add_to_lanes(&mut nonce, delta);

    Ok(nonce)
}

/// Builds a 64-bit delta from its high and low 32-bit halves.
pub fn delta_from_parts(hi: u32, lo: u32) -> u64 {
    (u64::from(hi) << 32) | u64::from(lo)
}

/// Finds the `delta` with `calculate_nonce(n1, delta) == n2`.
///
/// Returns `Ok(None)` when the lanes imply different deltas, meaning `n2`
/// was not produced from `n1` by advancing.
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] if either nonce is not 24 bytes long.
pub fn calculate_delta(n1: &[u8], n2: &[u8]) -> Result<Option<u64>> {
    let a = read_lanes(as_array::<NONCE_BYTES>("first nonce", n1)?);
    let b = read_lanes(as_array::<NONCE_BYTES>("second nonce", n2)?);

    Ok(lane_delta(&a, &b))
}

/// Common wrapping difference `b - a` of all lanes, if there is one.
fn lane_delta(a: &[u64; LANES], b: &[u64; LANES]) -> Option<u64> {
    let delta = b[0].wrapping_sub(a[0]);

    (1..LANES)
        .all(|i| b[i].wrapping_sub(a[i]) == delta)
        .then_some(delta)
}

/// A 24-byte nonce with lane-wise counter arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_BYTES]);

impl Nonce {
    /// Wraps raw nonce bytes.
    pub fn new(bytes: [u8; NONCE_BYTES]) -> Self {
        Nonce(bytes)
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_BYTES] {
        &self.0
    }

    /// In-place form of [`advance`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeltaOutOfRange`] unless `1 <= delta <= 255`.
    pub fn advance(&mut self, delta: u32) -> Result<()> {
        advance(&mut self.0, delta)
    }

    /// Advances every lane by 1.
    pub fn advance_oddly(&mut self) {
        add_to_lanes(&mut self.0, 1);
    }

    /// Advances every lane by 2.
    pub fn advance_evenly(&mut self) {
        add_to_lanes(&mut self.0, 2);
    }

    /// Returns this nonce advanced by `delta`.
    pub fn offset(&self, delta: u64) -> Self {
        let mut next = *self;
        add_to_lanes(&mut next.0, delta);

        next
    }

    /// Distance from `self` to `later`, or `None` if the lanes disagree.
    pub fn delta_to(&self, later: &Nonce) -> Option<u64> {
        lane_delta(&read_lanes(&self.0), &read_lanes(&later.0))
    }
}

impl From<[u8; NONCE_BYTES]> for Nonce {
    fn from(bytes: [u8; NONCE_BYTES]) -> Self {
        Nonce(bytes)
    }
}

impl TryFrom<&[u8]> for Nonce {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Ok(Nonce(*as_array::<NONCE_BYTES>("nonce", bytes)?))
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
