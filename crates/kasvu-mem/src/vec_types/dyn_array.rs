use core::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem,
    ops::{Deref, DerefMut},
    slice,
};

use kasvu_log::{trace, debug};

use crate::{
    capacity_policy::{CapacityPolicy, Doubling, capacity_overflow},
    errors::AccessError,
    impl_traits,
    const_assert,
    Result,
};

use super::{
    buffer::Buffer,
    IntoIter,
    Position,
};

use AccessError::OutOfRange;

/// A contiguous growable array.
///
/// The first [`len`](Self::len) of [`capacity`](Self::capacity) slots hold
/// live elements. When a push or insert finds the array full, the capacity
/// policy `P` picks a larger capacity (for [`Doubling`]: `max(1, cap * 2)`),
/// the live elements move into a fresh buffer and the old one is released.
/// Capacity never shrinks.
///
/// Element access comes in two flavors:
///
/// - checked: [`at`](Self::at), [`at_mut`](Self::at_mut),
///   [`insert_at`](Self::insert_at), [`remove_at`](Self::remove_at) return
///   [`AccessError::OutOfRange`] for bad indices.
/// - unchecked: [`index_unchecked`](Self::index_unchecked),
///   [`first_unchecked`](Self::first_unchecked),
///   [`last_unchecked`](Self::last_unchecked), [`slot`](Self::slot),
///   [`insert`](Self::insert) and [`erase`](Self::erase) perform no
///   validation in release builds; violating their preconditions is
///   undefined behavior.
///
/// Arrays compare lexicographically over their live elements.
pub struct DynArray<T, P: CapacityPolicy = Doubling> {
    buf: Buffer<T>,
    len: usize,
    _policy: PhantomData<P>,
}

const_assert!(size_of::<DynArray<u32>>() == size_of::<Option<DynArray<u32>>>());

impl<T> DynArray<T, Doubling> {

    /// Empty array without an allocation.
    #[inline(always)]
    pub fn new() -> Self {
        Self::with_policy()
    }

    /// Empty array with exactly `capacity` slots.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_policy(capacity)
    }
}

impl<T, P: CapacityPolicy> DynArray<T, P> {

    #[inline(always)]
    pub fn with_policy() -> Self {
        Self::with_capacity_and_policy(0)
    }

    pub fn with_capacity_and_policy(capacity: usize) -> Self {
        Self {
            buf: Buffer::with_capacity(capacity),
            len: 0,
            _policy: PhantomData,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    fn grow_to(&mut self, required: usize) {
        let capacity = self.capacity();
        let new_capacity = P::grow(capacity, required);
        debug_assert!(new_capacity >= required);
        let mut tmp = Buffer::with_capacity(new_capacity);
        unsafe {
            self.buf.move_elements(&mut tmp, self.len);
        }
        self.buf = tmp;
        trace!("grew capacity {} -> {} (len {})", capacity, new_capacity, self.len);
    }

    #[inline(always)]
    fn grow_if_full(&mut self) {
        if self.len == self.capacity() {
            let required = match self.len.checked_add(1) {
                Some(r) => r,
                None => capacity_overflow(),
            };
            self.grow_to(required)
        }
    }

    fn out_of_range(&self, index: usize) -> AccessError {
        debug!("index {} was out of range for len {}", index, self.len);
        OutOfRange { index, len: self.len }
    }

    /// Makes room for at least `additional` more elements.
    ///
    /// Grows through the capacity policy, so the result may exceed
    /// `len + additional`.
    pub fn reserve(&mut self, additional: usize) {
        let required = match self.len.checked_add(additional) {
            Some(r) => r,
            None => capacity_overflow(),
        };
        if required > self.capacity() {
            self.grow_to(required)
        }
    }

    /// Appends `value`, growing first when the array is full.
    ///
    /// Growth invalidates every outstanding [`Position`] and reference.
    #[inline(always)]
    pub fn push(&mut self, value: T) {
        self.grow_if_full();
        unsafe { self.buf.write(self.len, value) }
        self.len += 1;
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None
        }
        self.len -= 1;
        Some(unsafe { self.buf.read(self.len) })
    }

    /// Drops the last element. Does nothing on an empty array.
    ///
    /// The capacity is kept.
    #[inline(always)]
    pub fn remove_last(&mut self) {
        if self.len == 0 {
            return
        }
        self.len -= 1;
        unsafe { self.buf.drop_in_place(self.len, 1) }
    }

    /// Drops every element, keeping the capacity.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        unsafe { self.buf.drop_in_place(0, len) }
    }

    /// # Safety
    ///
    /// `index` must be less than [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn index_unchecked(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len, "index {} out of bounds for len {}", index, self.len);
        unsafe { self.buf.get_unchecked_mut(index) }
    }

    /// Returns [`AccessError::OutOfRange`] when `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(self.out_of_range(index))
        }
        Ok(unsafe { self.buf.get_unchecked(index) })
    }

    /// Returns [`AccessError::OutOfRange`] when `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(self.out_of_range(index))
        }
        Ok(unsafe { self.buf.get_unchecked_mut(index) })
    }

    /// # Safety
    ///
    /// The array must not be empty.
    #[inline(always)]
    pub unsafe fn first_unchecked(&mut self) -> &mut T {
        debug_assert!(self.len != 0, "first element of an empty array");
        unsafe { self.buf.get_unchecked_mut(0) }
    }

    /// # Safety
    ///
    /// The array must not be empty.
    #[inline(always)]
    pub unsafe fn last_unchecked(&mut self) -> &mut T {
        debug_assert!(self.len != 0, "last element of an empty array");
        unsafe { self.buf.get_unchecked_mut(self.len.wrapping_sub(1)) }
    }

    /// Position of the first slot; equals [`end`](Self::end) when empty.
    #[inline(always)]
    pub fn begin(&self) -> Position<T> {
        Position::new(0)
    }

    /// One past the last live element.
    #[inline(always)]
    pub fn end(&self) -> Position<T> {
        Position::new(self.len as isize)
    }

    /// # Safety
    ///
    /// `pos` must lie in `[begin(), end())` of this array.
    #[inline(always)]
    pub unsafe fn slot(&self, pos: Position<T>) -> &T {
        let index = pos - self.begin();
        debug_assert!(index >= 0 && (index as usize) < self.len, "position {:?} outside live range", pos);
        unsafe { self.buf.get_unchecked(index as usize) }
    }

    /// # Safety
    ///
    /// `pos` must lie in `[begin(), end())` of this array.
    #[inline(always)]
    pub unsafe fn slot_mut(&mut self, pos: Position<T>) -> &mut T {
        let index = pos - self.begin();
        debug_assert!(index >= 0 && (index as usize) < self.len, "position {:?} outside live range", pos);
        unsafe { self.buf.get_unchecked_mut(index as usize) }
    }

    /// Inserts `value` before `pos` and returns the position of the new
    /// element.
    ///
    /// Elements at and after `pos` move one slot right. Grows exactly like
    /// [`push`](Self::push) when full.
    ///
    /// # Safety
    ///
    /// `pos` must lie in `[begin(), end()]` of this array.
    pub unsafe fn insert(&mut self, pos: Position<T>, value: T) -> Position<T> {
        let index = pos - self.begin();
        debug_assert!(index >= 0 && index as usize <= self.len, "insert position {:?} outside [0, {}]", pos, self.len);
        let index = index as usize;
        self.grow_if_full();
        unsafe { self.buf.insert_element(value, index, self.len) }
        self.len += 1;
        self.begin() + index as isize
    }

    /// Drops the element at `pos` and returns the position now holding its
    /// successor (or [`end`](Self::end) when it was the last one).
    ///
    /// # Safety
    ///
    /// `pos` must lie in `[begin(), end())` of this array.
    pub unsafe fn erase(&mut self, pos: Position<T>) -> Position<T> {
        let index = pos - self.begin();
        debug_assert!(index >= 0 && (index as usize) < self.len, "erase position {:?} outside [0, {})", pos, self.len);
        let index = index as usize;
        let removed = unsafe { self.buf.remove_element(index, self.len) };
        self.len -= 1;
        drop(removed);
        self.begin() + index as isize
    }

    /// Checked [`insert`](Self::insert); `index` may equal `len`.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<&mut T> {
        if index > self.len {
            return Err(self.out_of_range(index))
        }
        unsafe {
            let pos = self.insert(self.begin() + index as isize, value);
            Ok(self.slot_mut(pos))
        }
    }

    /// Checked removal returning the element.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(self.out_of_range(index))
        }
        let removed = unsafe { self.buf.remove_element(index, self.len) };
        self.len -= 1;
        Ok(removed)
    }

    pub fn resize_with<F>(&mut self, len: usize, mut f: F)
        where
            F: FnMut() -> T
    {
        if len > self.len {
            self.reserve(len - self.len);
            while self.len < len {
                unsafe { self.buf.write(self.len, f()) }
                self.len += 1;
            }
        }
        else if len < self.len {
            let tail = self.len - len;
            self.len = len;
            unsafe { self.buf.drop_in_place(len, tail) }
        }
    }

    pub fn resize(&mut self, len: usize, value: T)
        where
            T: Clone
    {
        self.resize_with(len, || value.clone())
    }

    pub fn extend_from_slice(&mut self, values: &[T])
        where
            T: Clone
    {
        self.reserve(values.len());
        for value in values {
            unsafe { self.buf.write(self.len, value.clone()) }
            self.len += 1;
        }
    }
}

impl_traits! {
    for DynArray<T, P: CapacityPolicy>
    Drop =>

        #[inline(always)]
        fn drop(&mut self) -> () {
            self.clear()
        }
    ,
    Default =>

        fn default() -> Self {
            Self::with_policy()
        }
    ,
    AsRef<[T]> =>

        #[inline(always)]
        fn as_ref(&self) -> &[T] {
            self.as_slice()
        }
    ,
    AsMut<[T]> =>

        #[inline(always)]
        fn as_mut(&mut self) -> &mut [T] {
            self.as_mut_slice()
        }
    ,
    Deref =>

        type Target = [T];

        #[inline(always)]
        fn deref(&self) -> &Self::Target {
            self.as_slice()
        }
    ,
    DerefMut =>

        #[inline(always)]
        fn deref_mut(&mut self) -> &mut Self::Target {
            self.as_mut_slice()
        }
    ,
    IntoIterator =>

        type Item = T;
        type IntoIter = IntoIter<T>;

        fn into_iter(mut self) -> Self::IntoIter {
            let len = mem::take(&mut self.len);
            let buf = mem::replace(&mut self.buf, Buffer::new());
            unsafe { IntoIter::new(buf, len) }
        }
    ,
    IntoIterator for &'vec =>

        type Item = &'vec T;
        type IntoIter = slice::Iter<'vec, T>;

        #[inline(always)]
        fn into_iter(self) -> Self::IntoIter {
            self.as_slice().iter()
        }
    ,
    IntoIterator for mut &'vec =>

        type Item = &'vec mut T;
        type IntoIter = slice::IterMut<'vec, T>;

        #[inline(always)]
        fn into_iter(self) -> Self::IntoIter {
            self.as_mut_slice().iter_mut()
        }
    ,
    Clone where T: Clone =>

        fn clone(&self) -> Self {
            let mut array = Self::with_capacity_and_policy(self.capacity());
            array.extend_from_slice(self.as_slice());
            array
        }

        fn clone_from(&mut self, source: &Self) {
            self.clear();
            self.extend_from_slice(source.as_slice());
        }
    ,
    PartialEq where T: PartialEq =>

        fn eq(&self, other: &Self) -> bool {
            self.len == other.len &&
                self.iter().zip(other.iter()).all(|(a, b)| a == b)
        }
    ,
    Eq where T: Eq =>,
    PartialOrd where T: PartialOrd =>

        // pairs that are neither less nor greater tie; lengths decide after
        // a tied prefix
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            for (a, b) in self.iter().zip(other.iter()) {
                if a < b {
                    return Some(Ordering::Less)
                }
                if a > b {
                    return Some(Ordering::Greater)
                }
            }
            Some(self.len.cmp(&other.len))
        }

        #[inline(always)]
        fn lt(&self, other: &Self) -> bool {
            self.partial_cmp(other) == Some(Ordering::Less)
        }

        #[inline(always)]
        fn gt(&self, other: &Self) -> bool {
            other.lt(self)
        }

        #[inline(always)]
        fn le(&self, other: &Self) -> bool {
            !self.gt(other)
        }

        #[inline(always)]
        fn ge(&self, other: &Self) -> bool {
            !self.lt(other)
        }
    ,
    Ord where T: Ord =>

        fn cmp(&self, other: &Self) -> Ordering {
            for (a, b) in self.iter().zip(other.iter()) {
                match a.cmp(b) {
                    Ordering::Equal => {},
                    ordering => return ordering,
                }
            }
            self.len.cmp(&other.len)
        }
    ,
    Hash where T: Hash =>

        fn hash<H: Hasher>(&self, state: &mut H) {
            self.as_slice().hash(state)
        }
    ,
    Debug where T: Debug =>

        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            <[T] as Debug>::fmt(self.as_slice(), f)
        }
    ,
    Display where T: Display =>

        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            let Some((last, init)) = self.as_slice().split_last() else {
                return f.write_str("[]")
            };
            f.write_str("[")?;
            for value in init {
                <T as Display>::fmt(value, f)?;
                f.write_str(", ")?;
            }
            <T as Display>::fmt(last, f)?;
            f.write_str("]")
        }
    ,
}

impl<T, P: CapacityPolicy> FromIterator<T> for DynArray<T, P> {

    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::with_policy();
        array.extend(iter);
        array
    }
}

impl<T, P: CapacityPolicy> Extend<T> for DynArray<T, P> {

    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a, P: CapacityPolicy> Extend<&'a T> for DynArray<T, P> {

    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<const N: usize, T, P: CapacityPolicy> From<[T; N]> for DynArray<T, P> {

    fn from(value: [T; N]) -> Self {
        let mut array = Self::with_capacity_and_policy(N);
        array.extend(value);
        array
    }
}

impl<T: Clone, P: CapacityPolicy> From<&[T]> for DynArray<T, P> {

    fn from(value: &[T]) -> Self {
        let mut array = Self::with_capacity_and_policy(value.len());
        array.extend_from_slice(value);
        array
    }
}
