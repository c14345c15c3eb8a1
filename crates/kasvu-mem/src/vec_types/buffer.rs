use core::{
    mem::MaybeUninit,
    ptr,
};

/// Owned slot storage of a growable array.
///
/// The slot count is the capacity. Which slots hold live values is tracked
/// by the owner, so dropping a `Buffer` frees the allocation without
/// dropping any element.
pub(crate) struct Buffer<T> {
    slots: Box<[MaybeUninit<T>]>,
}

impl<T> Buffer<T> {

    /// Zero slots, no allocation.
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Box::new_uninit_slice(capacity),
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.slots.as_ptr().cast()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.slots.as_mut_ptr().cast()
    }

    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        unsafe { &*self.as_ptr().add(index) }
    }

    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        unsafe { &mut *self.as_mut_ptr().add(index) }
    }

    #[inline(always)]
    pub unsafe fn write(&mut self, index: usize, value: T) {
        unsafe { self.as_mut_ptr().add(index).write(value) }
    }

    #[inline(always)]
    pub unsafe fn read(&self, index: usize) -> T {
        unsafe { self.as_ptr().add(index).read() }
    }

    /// Moves `[0, len)` into the front of `to`. The moved slots count as
    /// uninitialized in `self` afterwards.
    #[inline(always)]
    pub unsafe fn move_elements(&mut self, to: &mut Self, len: usize) {
        debug_assert!(len <= self.capacity() && len <= to.capacity());
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), to.as_mut_ptr(), len);
        }
    }

    /// Shifts `[index, len)` one slot right and writes `value` at `index`.
    ///
    /// Requires `index <= len < capacity`.
    #[inline(always)]
    pub unsafe fn insert_element(&mut self, value: T, index: usize, len: usize) {
        debug_assert!(index <= len && len < self.capacity());
        unsafe {
            let at = self.as_mut_ptr().add(index);
            ptr::copy(at, at.add(1), len - index);
            at.write(value);
        }
    }

    /// Reads out `index` and shifts `(index, len)` one slot left.
    ///
    /// Requires `index < len <= capacity`.
    #[inline(always)]
    pub unsafe fn remove_element(&mut self, index: usize, len: usize) -> T {
        debug_assert!(index < len && len <= self.capacity());
        unsafe {
            let at = self.as_mut_ptr().add(index);
            let removed = at.read();
            ptr::copy(at.add(1), at, len - index - 1);
            removed
        }
    }

    #[inline(always)]
    pub unsafe fn drop_in_place(&mut self, start: usize, len: usize) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.as_mut_ptr().add(start),
                len,
            ));
        }
    }
}
