use std::cmp::Ordering;

use kasvu_mem::{AccessError, DynArray};
use proptest::prelude::*;

fn build(values: &[i32]) -> DynArray<i32> {
    let mut array = DynArray::new();
    for &v in values {
        array.push(v);
    }
    array
}

proptest! {
    #[test]
    fn push_tracks_len_and_capacity(values in proptest::collection::vec(any::<i32>(), 0..200)) {
        let mut array: DynArray<i32> = DynArray::new();
        for (i, &v) in values.iter().enumerate() {
            let before = array.capacity();
            array.push(v);
            prop_assert_eq!(array.len(), i + 1);
            prop_assert!(array.capacity() >= array.len());
            if i == before {
                prop_assert_eq!(array.capacity(), usize::max(1, before * 2));
            } else {
                prop_assert_eq!(array.capacity(), before);
            }
        }
        prop_assert_eq!(array.as_slice(), &values[..]);
    }

    #[test]
    fn at_matches_model(
        values in proptest::collection::vec(any::<i32>(), 0..64),
        probe in 0usize..96,
    ) {
        let mut array = build(&values);
        match array.at(probe).copied() {
            Ok(v) => {
                prop_assert!(probe < values.len());
                prop_assert_eq!(v, values[probe]);
                prop_assert_eq!(unsafe { *array.index_unchecked(probe) }, v);
            }
            Err(AccessError::OutOfRange { index, len }) => {
                prop_assert!(probe >= values.len());
                prop_assert_eq!(index, probe);
                prop_assert_eq!(len, values.len());
            }
        }
    }

    #[test]
    fn insert_shifts_tail_right(
        values in proptest::collection::vec(any::<i32>(), 0..64),
        at in any::<prop::sample::Index>(),
        value in any::<i32>(),
    ) {
        let mut array = build(&values);
        let mut model = values.clone();
        let k = at.index(values.len() + 1);
        let pos = unsafe { array.insert(array.begin() + k as isize, value) };
        model.insert(k, value);
        prop_assert_eq!(pos - array.begin(), k as isize);
        prop_assert_eq!(unsafe { *array.slot(pos) }, value);
        prop_assert_eq!(array.as_slice(), &model[..]);
    }

    #[test]
    fn erase_shifts_tail_left(
        values in proptest::collection::vec(any::<i32>(), 1..64),
        at in any::<prop::sample::Index>(),
    ) {
        let mut array = build(&values);
        let mut model = values.clone();
        let capacity = array.capacity();
        let k = at.index(values.len());
        let pos = unsafe { array.erase(array.begin() + k as isize) };
        model.remove(k);
        prop_assert_eq!(pos - array.begin(), k as isize);
        prop_assert_eq!(array.as_slice(), &model[..]);
        prop_assert_eq!(array.capacity(), capacity);
        if k == model.len() {
            prop_assert_eq!(pos, array.end());
        }
    }

    #[test]
    fn comparisons_match_slices(
        a in proptest::collection::vec(-4i32..4, 0..8),
        b in proptest::collection::vec(-4i32..4, 0..8),
    ) {
        let x = build(&a);
        let y = build(&b);
        prop_assert_eq!(x == y, a == b);
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
        prop_assert_eq!(x < y, a < b);
        prop_assert_eq!(x <= y, a <= b);
        prop_assert_eq!(x > y, a > b);
        prop_assert_eq!(x >= y, a >= b);
        if a.len() != b.len() {
            prop_assert!(x != y);
        }
    }

    #[test]
    fn float_operators_are_consistent(
        a in proptest::collection::vec(prop::sample::select(vec![0.0f64, 1.0, f64::NAN]), 0..6),
        b in proptest::collection::vec(prop::sample::select(vec![0.0f64, 1.0, f64::NAN]), 0..6),
    ) {
        let x: DynArray<f64> = DynArray::from(&a[..]);
        let y: DynArray<f64> = DynArray::from(&b[..]);
        prop_assert_eq!(x > y, y < x);
        prop_assert_eq!(x <= y, !(x > y));
        prop_assert_eq!(x >= y, !(x < y));
        prop_assert!(x.partial_cmp(&y).is_some());
        prop_assert!(!(x < y && y < x));
    }

    #[test]
    fn clear_keeps_capacity(values in proptest::collection::vec(any::<i32>(), 0..64)) {
        let mut array = build(&values);
        let capacity = array.capacity();
        array.clear();
        prop_assert!(array.is_empty());
        prop_assert_eq!(array.capacity(), capacity);
        prop_assert_eq!(array.begin(), array.end());
    }

    #[test]
    fn clones_are_independent(
        values in proptest::collection::vec(any::<i32>(), 1..64),
        extra in any::<i32>(),
    ) {
        let original = build(&values);
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);
        prop_assert_eq!(copy.capacity(), original.capacity());
        let first = copy.at_mut(0).unwrap();
        *first = first.wrapping_add(1);
        copy.push(extra);
        prop_assert_eq!(original.as_slice(), &values[..]);
        prop_assert_ne!(copy.as_slice(), original.as_slice());
    }

    #[test]
    fn remove_last_pops_model(
        values in proptest::collection::vec(any::<i32>(), 0..32),
        removals in 0usize..40,
    ) {
        let mut array = build(&values);
        let mut model = values.clone();
        let capacity = array.capacity();
        for _ in 0..removals {
            array.remove_last();
            model.pop();
        }
        prop_assert_eq!(array.as_slice(), &model[..]);
        prop_assert_eq!(array.capacity(), capacity);
    }
}

#[test]
fn incomparable_pairs_tie_and_length_decides() {
    let a: DynArray<f32> = DynArray::from([1.0, f32::NAN]);
    let b: DynArray<f32> = DynArray::from([1.0, 2.0]);
    assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
    assert!(a <= b);
    assert!(a >= b);
    let shorter: DynArray<f32> = DynArray::from([f32::NAN]);
    let longer: DynArray<f32> = DynArray::from([1.0, 0.0]);
    assert!(shorter < longer);
    assert!(longer > shorter);
    assert!(!(shorter >= longer));
}
