//! Hash algorithms exposed by the crate.
//!
//! Currently includes SHA-256 with a pure-Rust, streaming implementation.

pub mod sha256;

/// Re-export of the SHA-256 context and convenience function.
pub use sha256::{Sha256, sha256};
