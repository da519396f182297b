use core::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::compare;
use crate::linked_list::generic::{GenericList, ListBuilder};
use crate::slot::Slot;

use super::{filled, ints};

fn int32_list(values: &[i32]) -> GenericList {
    let mut list = ListBuilder::new().with_comparator(compare::int32).build();
    list.extend(values.iter().copied());
    list
}

#[test]
fn test_sort_then_find() {
    let list = int32_list(&[5, 2, 9, 1]);
    assert_eq!(list.find(9i32), Some(2));

    list.sort();
    assert_eq!(ints(&list), vec![1, 2, 5, 9]);
    assert_eq!(list.find(9i32), Some(3));
    assert_eq!(list.peek(), Some(Slot::from(1i32)));
    assert_eq!(list.peek_last(), Some(Slot::from(9i32)));
    list.validate().unwrap();
}

#[test]
fn test_sort_is_idempotent() {
    let list = int32_list(&[3, -1, 3, 0, -7, 12]);
    list.sort();
    let once = list.to_vec();
    list.sort();
    assert_eq!(list.to_vec(), once);
    assert_eq!(ints(&list), vec![-7, -1, 0, 3, 3, 12]);
}

#[test]
fn test_sort_trivial_lists() {
    let list = int32_list(&[]);
    list.sort();
    assert!(list.is_empty());
    list.validate().unwrap();

    let list = int32_list(&[42]);
    list.sort();
    assert_eq!(ints(&list), vec![42]);
    list.validate().unwrap();
}

#[test]
fn test_sort_keeps_equal_elements_in_order() {
    // int32 compares these equal, but the tags tell them apart
    let list = ListBuilder::new().with_comparator(compare::int32).build();
    list.append(2i32);
    list.append(1i8);
    list.append(1i16);
    list.append(0i32);
    list.append(1i32);

    list.sort();
    assert_eq!(
        list.to_vec(),
        vec![
            Slot::from(0i32),
            Slot::from(1i8),
            Slot::from(1i16),
            Slot::from(1i32),
            Slot::from(2i32),
        ]
    );
}

#[test]
fn test_sort_by_overrides_configured_comparator() {
    let list = int32_list(&[1, 3, 2]);
    list.sort_by(|a, b| compare::int32(b, a));
    assert_eq!(ints(&list), vec![3, 2, 1]);

    // configured comparator is untouched
    list.sort();
    assert_eq!(ints(&list), vec![1, 2, 3]);
}

#[test]
fn test_raw_sort_of_negative_numbers() {
    // raw word order puts sign-extended negatives last
    let list = filled(&[-1, 2, 1]);
    list.sort();
    assert_eq!(ints(&list), vec![1, 2, -1]);
}

#[test]
fn test_sort_floating_point() {
    let mut list = ListBuilder::new().with_comparator(compare::float).build();
    list.extend([2.5f32, -1.0, 0.25]);
    list.sort();
    let values: Vec<f32> = list.to_vec().iter().filter_map(Slot::decode).collect();
    assert_eq!(values, vec![-1.0, 0.25, 2.5]);

    let mut list = ListBuilder::new().with_comparator(compare::double).build();
    list.extend([1e10f64, -3.5, 0.0]);
    list.sort();
    let values: Vec<f64> = list.to_vec().iter().filter_map(Slot::decode).collect();
    assert_eq!(values, vec![-3.5, 0.0, 1e10]);
}

#[test]
fn test_sort_alphabetical() {
    let mut list = ListBuilder::new().with_comparator(compare::alphabetical).build();
    list.extend(["pear", "Apple", "banana", "apple"]);
    list.sort();
    let words: Vec<String> = list
        .to_vec()
        .iter()
        .filter_map(|slot| slot.text().map(str::to_owned))
        .collect();
    assert_eq!(words, vec!["Apple", "apple", "banana", "pear"]);
    assert_eq!(list.find("PEAR"), Some(3));
}

#[test]
fn test_sort_matches_std_sort() {
    let mut rng = StdRng::seed_from_u64(0x50f7);

    for len in [2usize, 3, 7, 64, 255, 1000] {
        let values: Vec<i32> = (0..len).map(|_| rng.random_range(-50..50)).collect();
        let list = int32_list(&values);
        list.sort();

        let mut expected = values.clone();
        expected.sort();
        assert_eq!(ints(&list), expected, "len {len}");
        list.validate().unwrap();
    }
}

#[test]
fn test_sort_is_stable_on_random_records() {
    let mut rng = StdRng::seed_from_u64(0x57ab);
    let records: Vec<(u8, usize)> = (0..500).map(|seq| (rng.random_range(0..8), seq)).collect();

    let mut list = GenericList::new();
    list.extend(records.iter().map(|&record| Slot::shared(record)));
    let by_key = |a: &Slot, b: &Slot| -> Ordering {
        let a = a.downcast_ref::<(u8, usize)>().expect("record slot");
        let b = b.downcast_ref::<(u8, usize)>().expect("record slot");
        a.0.cmp(&b.0)
    };
    list.sort_by(by_key);

    let mut expected = records.clone();
    expected.sort_by_key(|record| record.0);
    let sorted: Vec<(u8, usize)> = list
        .to_vec()
        .iter()
        .map(|slot| *slot.downcast_ref::<(u8, usize)>().expect("record slot"))
        .collect();
    assert_eq!(sorted, expected);
    list.validate().unwrap();
}

#[test_log::test]
fn test_panicking_comparator_leaves_list_valid() {
    let released = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&released);
    let mut list = ListBuilder::new()
        .with_comparator(compare::int32)
        .with_deallocator(move |_| {
            sink.fetch_add(1, AtomicOrdering::SeqCst);
        })
        .build();
    list.extend([8i32, 3, 6, 1, 7, 2, 5, 4]);
    let cursor = list.cursor();
    assert_eq!(cursor.forward().unwrap(), Some(Slot::from(8i32)));

    let calls = AtomicUsize::new(0);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        list.sort_by(|a, b| {
            if calls.fetch_add(1, AtomicOrdering::SeqCst) == 6 {
                panic!("comparator gave up");
            }
            compare::int32(a, b)
        });
    }));
    assert!(outcome.is_err());

    // order is unspecified, but every element is still linked exactly once
    list.validate().unwrap();
    assert_eq!(list.len(), 8);
    let mut values = ints(&list);
    values.sort();
    assert_eq!(values, (1..=8).collect::<Vec<_>>());
    assert_eq!(cursor.current().unwrap(), Some(Slot::from(8i32)));

    // the list is fully usable afterwards
    list.sort();
    assert_eq!(ints(&list), (1..=8).collect::<Vec<_>>());
    drop(cursor);
    list.clear().unwrap();
    assert_eq!(released.load(AtomicOrdering::SeqCst), 8);
}
