//! Salsa20 family.
//!
//! - `salsa20`: the Salsa20 and HSalsa20 core functions over fixed-size
//!   buffers.
//! - `xsalsa20`: keystream XOR built on the cores, with 8-byte (Salsa20)
//!   and 24-byte (XSalsa20) nonces.

pub mod salsa20;
pub mod xsalsa20;

pub use salsa20::{SIGMA, hsalsa20, hsalsa20_core, salsa20, salsa20_core};
pub use xsalsa20::{salsa20_xor, salsa20_xor_in_place, xsalsa20_xor, xsalsa20_xor_in_place};
