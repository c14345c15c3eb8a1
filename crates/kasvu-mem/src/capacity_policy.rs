//! Growth strategies for [`DynArray`](crate::DynArray).

/// Decides the capacity a full array reallocates to.
pub trait CapacityPolicy {

    /// Returns a capacity of at least `required`, or `current` when it
    /// already fits.
    ///
    /// Panics with `"capacity overflow"` when no such capacity is
    /// representable.
    fn grow(current: usize, required: usize) -> usize;
}

/// `max(1, capacity * 2)`, repeated until the request fits.
#[derive(Clone, Copy, Default, Debug)]
pub struct Doubling;

impl CapacityPolicy for Doubling {

    #[inline]
    fn grow(current: usize, required: usize) -> usize {
        let mut capacity = current;
        while capacity < required {
            capacity = match capacity.checked_mul(2) {
                Some(doubled) => doubled.max(1),
                None => capacity_overflow(),
            };
        }
        capacity
    }
}

#[cold]
#[inline(never)]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_starts_at_one() {
        assert_eq!(Doubling::grow(0, 1), 1);
        assert_eq!(Doubling::grow(1, 2), 2);
        assert_eq!(Doubling::grow(2, 3), 4);
        assert_eq!(Doubling::grow(4, 5), 8);
    }

    #[test]
    fn doubling_keeps_fitting_capacity() {
        assert_eq!(Doubling::grow(8, 8), 8);
        assert_eq!(Doubling::grow(8, 0), 8);
        assert_eq!(Doubling::grow(0, 0), 0);
    }

    #[test]
    fn doubling_repeats_for_large_requests() {
        assert_eq!(Doubling::grow(0, 5), 8);
        assert_eq!(Doubling::grow(3, 13), 24);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn doubling_overflow_panics() {
        Doubling::grow(usize::MAX / 2 + 1, usize::MAX);
    }
}
