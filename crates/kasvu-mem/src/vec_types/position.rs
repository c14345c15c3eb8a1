use core::{
    cmp::Ordering,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use crate::impl_traits;

/// A slot locator inside one [`DynArray`](crate::DynArray).
///
/// A position is a signed offset from the array's first slot; it borrows
/// nothing and stays a plain value across mutations. It is only meaningful
/// for the array (and the state of that array) it was obtained from: after
/// an element is inserted or erased before it, it names a different element.
/// Arithmetic wraps and is never bounds checked. Dereferencing goes through
/// [`DynArray::slot`](crate::DynArray::slot) and
/// [`DynArray::slot_mut`](crate::DynArray::slot_mut).
pub struct Position<T> {
    offset: isize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Position<T> {

    #[inline(always)]
    pub(crate) const fn new(offset: isize) -> Self {
        Self {
            offset,
            _marker: PhantomData,
        }
    }

    /// Distance from the first slot.
    #[inline(always)]
    pub fn offset(self) -> isize {
        self.offset
    }

    #[inline(always)]
    pub fn increment(&mut self) -> &mut Self {
        self.offset = self.offset.wrapping_add(1);
        self
    }

    #[inline(always)]
    pub fn decrement(&mut self) -> &mut Self {
        self.offset = self.offset.wrapping_sub(1);
        self
    }
}

impl_traits! {
    for Position<T>
    Clone =>

        #[inline(always)]
        fn clone(&self) -> Self {
            *self
        }
    ,
    Copy =>,
    PartialEq =>

        #[inline(always)]
        fn eq(&self, other: &Self) -> bool {
            self.offset == other.offset
        }
    ,
    Eq =>,
    PartialOrd =>

        #[inline(always)]
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    ,
    Ord =>

        #[inline(always)]
        fn cmp(&self, other: &Self) -> Ordering {
            self.offset.cmp(&other.offset)
        }
    ,
    Hash =>

        fn hash<H: Hasher>(&self, state: &mut H) {
            self.offset.hash(state)
        }
    ,
    Debug =>

        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.debug_tuple("Position").field(&self.offset).finish()
        }
    ,
    Add<isize> =>

        type Output = Self;

        #[inline(always)]
        fn add(self, count: isize) -> Self {
            Self::new(self.offset.wrapping_add(count))
        }
    ,
    Sub<isize> =>

        type Output = Self;

        #[inline(always)]
        fn sub(self, count: isize) -> Self {
            Self::new(self.offset.wrapping_sub(count))
        }
    ,
    AddAssign<isize> =>

        #[inline(always)]
        fn add_assign(&mut self, count: isize) {
            self.offset = self.offset.wrapping_add(count);
        }
    ,
    SubAssign<isize> =>

        #[inline(always)]
        fn sub_assign(&mut self, count: isize) {
            self.offset = self.offset.wrapping_sub(count);
        }
    ,
}

/// Signed slot distance between two positions of the same array.
impl<T> Sub for Position<T> {

    type Output = isize;

    #[inline(always)]
    fn sub(self, rhs: Self) -> isize {
        self.offset.wrapping_sub(rhs.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Pos = Position<u32>;

    #[test]
    fn increment_and_decrement_step_one_slot() {
        let mut pos = Pos::new(3);
        pos.increment().increment();
        assert_eq!(pos.offset(), 5);
        pos.decrement();
        assert_eq!(pos, Pos::new(4));
    }

    #[test]
    fn offset_arithmetic_is_unchecked() {
        let begin = Pos::new(0);
        assert_eq!((begin + 7).offset(), 7);
        assert_eq!((begin - 2).offset(), -2);
        let mut pos = begin;
        pos += 4;
        pos -= 1;
        assert_eq!(pos.offset(), 3);
        assert_eq!(Pos::new(isize::MAX) + 1, Pos::new(isize::MIN));
    }

    #[test]
    fn difference_is_signed() {
        let a = Pos::new(2);
        let b = Pos::new(9);
        assert_eq!(b - a, 7);
        assert_eq!(a - b, -7);
        assert_eq!((a + 5) - a, 5);
    }

    #[test]
    fn positions_order_by_offset() {
        assert!(Pos::new(1) < Pos::new(2));
        assert!(Pos::new(-1) < Pos::new(0));
        assert_ne!(Pos::new(1), Pos::new(2));
        assert_eq!(format!("{:?}", Pos::new(6)), "Position(6)");
    }
}
