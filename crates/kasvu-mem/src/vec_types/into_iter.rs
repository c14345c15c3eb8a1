use core::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    slice,
};

use super::buffer::Buffer;

/// Owning iterator over the elements of a [`DynArray`](crate::DynArray).
///
/// Elements not yet yielded are dropped together with the iterator.
pub struct IntoIter<T> {
    buf: Buffer<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {

    /// Takes ownership of `[0, len)` of `buf`.
    #[inline(always)]
    pub(crate) unsafe fn new(buf: Buffer<T>, len: usize) -> Self {
        debug_assert!(len <= buf.capacity());
        Self {
            buf,
            start: 0,
            end: len,
        }
    }

    /// Elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start)
        }
    }
}

impl<T> Iterator for IntoIter<T> {

    type Item = T;

    #[inline(always)]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None
        }
        let value = unsafe { self.buf.read(self.start) };
        self.start += 1;
        Some(value)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {

    #[inline(always)]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None
        }
        self.end -= 1;
        Some(unsafe { self.buf.read(self.end) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {

    fn drop(&mut self) {
        let remaining = self.end - self.start;
        let start = self.start;
        self.start = self.end;
        unsafe { self.buf.drop_in_place(start, remaining) }
    }
}

impl<T: Debug> Debug for IntoIter<T> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
