use std::cell::RefCell;
use std::collections::HashMap;

use log::{trace, warn};
use zeroize::{DefaultIsZeroes, Zeroize};

use crate::error::{Error, Result};

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// Element types a factory can pool.
///
/// Each width is backed by its own free lists inside [`ArrayFactory`]; the
/// trait selects them. It is sealed: only `u8`, `u32` and `u64` buffers are
/// pooled.
pub trait Element: Copy + Default + DefaultIsZeroes + sealed::Sealed + 'static {
    /// Width of one element in bytes.
    const WIDTH: usize;

    #[doc(hidden)]
    fn lists(factory: &mut ArrayFactory) -> &mut FreeLists<Self>;
}

impl Element for u8 {
    const WIDTH: usize = 1;

    fn lists(factory: &mut ArrayFactory) -> &mut FreeLists<Self> {
        &mut factory.bytes
    }
}

impl Element for u32 {
    const WIDTH: usize = 4;

    fn lists(factory: &mut ArrayFactory) -> &mut FreeLists<Self> {
        &mut factory.words
    }
}

impl Element for u64 {
    const WIDTH: usize = 8;

    fn lists(factory: &mut ArrayFactory) -> &mut FreeLists<Self> {
        &mut factory.dwords
    }
}

/// Free lists for one element width, keyed by buffer length.
#[doc(hidden)]
#[derive(Debug)]
pub struct FreeLists<T> {
    by_len: HashMap<usize, Vec<Vec<T>>>,
}

impl<T> Default for FreeLists<T> {
    fn default() -> Self {
        Self {
            by_len: HashMap::new(),
        }
    }
}

impl<T: Element> FreeLists<T> {
    fn idle(&self) -> usize {
        self.by_len.values().map(Vec::len).sum()
    }

    fn wipe(&mut self) -> usize {
        let mut wiped = 0;

        for bucket in self.by_len.values_mut() {
            for buf in bucket.iter_mut() {
                buf.as_mut_slice().zeroize();
                wiped += 1;
            }
        }

        wiped
    }
}

/// Size-class arena for fixed-length numeric buffers.
///
/// `get` returns a buffer of exactly the requested length, recycled if one
/// is idle and freshly allocated otherwise. `recycle` takes ownership back.
/// Free lists are LIFO per `(width, length)`: the buffer recycled last is
/// handed out first.
#[derive(Debug, Default)]
pub struct ArrayFactory {
    bytes: FreeLists<u8>,
    words: FreeLists<u32>,
    dwords: FreeLists<u64>,
    limit: Option<usize>,
}

impl ArrayFactory {
    /// Creates an empty factory with no bound on idle buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory that keeps at most `limit` idle buffers per size
    /// class. Buffers recycled beyond that are dropped.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Returns a buffer of `len` elements.
    ///
    /// The content is unspecified when the buffer is recycled: it is whatever
    /// the previous owner left in it.
    pub fn get<T: Element>(&mut self, len: usize) -> Vec<T> {
        if let Some(buf) = T::lists(self).by_len.get_mut(&len).and_then(Vec::pop) {
            return buf;
        }

        // Boxed slices have capacity == len, which `recycle` relies on.
        vec![T::default(); len].into_boxed_slice().into_vec()
    }

    /// Files `buf` back into the free list for its size class.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubViewRecycled`] if the buffer's backing allocation
    /// is larger than its visible length. Such a buffer shares storage with
    /// data outside its view and must not be handed to another borrower.
    pub fn recycle<T: Element>(&mut self, buf: Vec<T>) -> Result<()> {
        if buf.capacity() != buf.len() {
            warn!(
                "rejected recycle of {}-byte-wide sub-view (len {}, capacity {})",
                T::WIDTH,
                buf.len(),
                buf.capacity()
            );

            return Err(Error::SubViewRecycled {
                len: buf.len(),
                capacity: buf.capacity(),
            });
        }

        let limit = self.limit;
        let bucket = T::lists(self).by_len.entry(buf.len()).or_default();

        if limit.is_some_and(|max| bucket.len() >= max) {
            trace!("size class ({}, {}) full, dropping buffer", T::WIDTH, buf.len());
            return Ok(());
        }

        bucket.push(buf);

        Ok(())
    }

    /// Recycles every buffer in `bufs`, stopping at the first rejected one.
    ///
    /// Buffers ahead of the rejected one stay filed. The rejected buffer and
    /// everything after it are dropped without being recycled.
    ///
    /// # Errors
    ///
    /// Returns the error of the first buffer [`recycle`](Self::recycle)
    /// rejects.
    pub fn recycle_all<T, I>(&mut self, bufs: I) -> Result<()>
    where
        T: Element,
        I: IntoIterator<Item = Vec<T>>,
    {
        for buf in bufs {
            self.recycle(buf)?;
        }

        Ok(())
    }

    /// Zeroes every idle buffer of every width and length.
    ///
    /// Returns the number of buffers wiped.
    pub fn wipe_recycled(&mut self) -> usize {
        let wiped = self.bytes.wipe() + self.words.wipe() + self.dwords.wipe();
        trace!("wiped {wiped} idle buffers");

        wiped
    }

    /// Drops every free list, releasing idle memory to the allocator.
    pub fn clear(&mut self) {
        trace!("clearing {} idle buffers", self.idle());

        self.bytes = FreeLists::default();
        self.words = FreeLists::default();
        self.dwords = FreeLists::default();
    }

    /// Number of buffers currently idle in the factory.
    pub fn idle(&self) -> usize {
        self.bytes.idle() + self.words.idle() + self.dwords.idle()
    }
}

thread_local! {
    static LOCAL_FACTORY: RefCell<ArrayFactory> = RefCell::new(ArrayFactory::new());
}

/// Runs `f` with this thread's factory.
///
/// # Panics
///
/// Panics if called re-entrantly from inside `f`.
pub fn with_local_factory<R>(f: impl FnOnce(&mut ArrayFactory) -> R) -> R {
    LOCAL_FACTORY.with(|factory| f(&mut factory.borrow_mut()))
}

/// Runs `f` with this thread's factory, or with a scratch factory when the
/// local one is already borrowed further up the stack.
///
/// Used by kernels that pool their scratch internally, so that they stay
/// callable from inside [`with_local_factory`].
pub(crate) fn with_available_factory<R>(f: impl FnOnce(&mut ArrayFactory) -> R) -> R {
    LOCAL_FACTORY.with(|factory| match factory.try_borrow_mut() {
        Ok(mut factory) => f(&mut factory),
        Err(_) => {
            trace!("local factory busy, using a scratch factory");
            f(&mut ArrayFactory::new())
        }
    })
}
