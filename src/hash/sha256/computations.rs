//! SHA-256 message schedule and round function.

use super::K256;

#[inline(always)]
pub fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
pub fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline(always)]
pub fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
pub fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
pub fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ ((!e) & g)
}

#[inline(always)]
pub fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// Expands a 64-byte block into the full 64-word message schedule.
///
/// Words 0..16 are the block read big-endian; the rest follow
/// `w[i] = σ1(w[i-2]) + w[i-7] + σ0(w[i-15]) + w[i-16]`.
pub fn schedule(block: &[u8; 64]) -> [u32; 64] {
    let mut w = [0u32; 64];

    for (slot, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *slot = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    w
}

/// Working variables `a..h` of the compression loop.
#[derive(Clone, Copy)]
struct Working([u32; 8]);

impl Working {
    #[inline(always)]
    fn round(&mut self, k: u32, w: u32) {
        let [a, b, c, d, e, f, g, h] = self.0;

        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(k)
            .wrapping_add(w);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        self.0 = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
    }
}

/// Runs the 64 compression rounds and accumulates into `state`.
#[cfg(not(feature = "speed"))]
pub fn all_rounds(state: &mut [u32; 8], w: &[u32; 64]) {
    let mut v = Working(*state);

    for (k, w) in K256.iter().zip(w) {
        v.round(*k, *w);
    }

    state.iter_mut().zip(v.0).for_each(|(s, x)| *s = s.wrapping_add(x));
}

/// Runs the 64 compression rounds and accumulates into `state`.
///
/// Fully unrolled variant.
#[cfg(feature = "speed")]
pub fn all_rounds(state: &mut [u32; 8], w: &[u32; 64]) {
    let mut v = Working(*state);

    macro_rules! R8 {
        ($base:expr) => {
            v.round(K256[$base], w[$base]);
            v.round(K256[$base + 1], w[$base + 1]);
            v.round(K256[$base + 2], w[$base + 2]);
            v.round(K256[$base + 3], w[$base + 3]);
            v.round(K256[$base + 4], w[$base + 4]);
            v.round(K256[$base + 5], w[$base + 5]);
            v.round(K256[$base + 6], w[$base + 6]);
            v.round(K256[$base + 7], w[$base + 7]);
        };
    }

    R8!(0);
    R8!(8);
    R8!(16);
    R8!(24);
    R8!(32);
    R8!(40);
    R8!(48);
    R8!(56);

    state.iter_mut().zip(v.0).for_each(|(s, x)| *s = s.wrapping_add(x));
}
