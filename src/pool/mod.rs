//! Buffer pooling and secure erasure.
//!
//! The kernels in this crate work on small fixed-length buffers. Higher
//! layers that process many messages keep reusing buffers of the same few
//! shapes, so this module provides an explicit free-list arena indexed by
//! size class:
//!
//! - [`ArrayFactory`]
//!   Hands out `Vec<T>` buffers of an exact length and takes them back
//!   through a consuming `recycle`. Each element width has its own typed
//!   free lists, so a buffer can never be filed under the wrong width.
//!
//! - [`wipe`]
//!   Zeroes buffers unconditionally, whether or not they came from a pool.
//!
//! Recycled buffers are **not** cleared. A buffer handed out by `get` may
//! still contain whatever its previous owner left in it. Callers that held
//! key material must call [`wipe`] before recycling, or
//! [`ArrayFactory::wipe_recycled`] before teardown.
//!
//! A factory is not shared between threads. [`with_local_factory`] gives
//! each thread its own instance.

mod factory;

pub use factory::{ArrayFactory, Element, with_local_factory};
pub(crate) use factory::with_available_factory;

use zeroize::Zeroize;

/// Zeroes every given buffer, skipping absent entries.
///
/// This is independent of pool membership: it works on any mutable slice
/// of a pooled element type.
///
/// ```
/// use saltcore::pool::wipe;
///
/// let mut key = [7u8; 32];
/// let mut block = [9u8; 16];
/// wipe([Some(&mut key[..]), None, Some(&mut block[..])]);
///
/// assert_eq!(key, [0u8; 32]);
/// assert_eq!(block, [0u8; 16]);
/// ```
pub fn wipe<'a, T, I>(bufs: I)
where
    T: Element + 'a,
    I: IntoIterator<Item = Option<&'a mut [T]>>,
{
    for buf in bufs.into_iter().flatten() {
        buf.zeroize();
    }
}
