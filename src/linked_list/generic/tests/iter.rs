use crate::compare;
use crate::error::ListError;
use crate::linked_list::generic::{GenericList, ListBuilder};
use crate::slot::Slot;

use super::filled;

fn drain_forward(list: &GenericList) -> Vec<i32> {
    let cursor = list.cursor();
    let mut values = Vec::new();
    while let Some(slot) = cursor.forward().unwrap() {
        values.push(slot.decode::<i32>().unwrap());
    }
    values
}

#[test]
fn test_forward_then_backward_round_trip() {
    let list = filled(&[1, 2, 3, 4]);
    let cursor = list.cursor();
    assert!(cursor.is_unset());

    for expected in 1..=4 {
        assert_eq!(cursor.forward().unwrap(), Some(Slot::from(expected)));
    }

    cursor.reset();
    assert!(cursor.is_unset());
    for expected in (1..=4).rev() {
        assert_eq!(cursor.backward().unwrap(), Some(Slot::from(expected)));
    }
}

#[test]
fn test_exhaustion_keeps_position() {
    let list = filled(&[1, 2]);
    let cursor = list.cursor();

    cursor.forward().unwrap();
    cursor.forward().unwrap();
    assert_eq!(cursor.forward().unwrap(), None);
    assert_eq!(cursor.forward().unwrap(), None);
    assert_eq!(cursor.current().unwrap(), Some(Slot::from(2i32)));

    // still on the tail, so backward reaches the head
    assert_eq!(cursor.backward().unwrap(), Some(Slot::from(1i32)));
    assert_eq!(cursor.backward().unwrap(), None);
    assert_eq!(cursor.current().unwrap(), Some(Slot::from(1i32)));
}

#[test]
fn test_zero_data_is_not_exhaustion() {
    let list = filled(&[0, 0]);
    assert_eq!(drain_forward(&list), vec![0, 0]);
}

#[test]
fn test_empty_list_cursor() {
    let list = GenericList::new();
    let cursor = list.cursor();
    assert_eq!(cursor.forward().unwrap(), None);
    assert_eq!(cursor.backward().unwrap(), None);
    assert_eq!(cursor.current().unwrap(), None);
    assert!(cursor.is_unset());

    // elements appended later are visible from the unset position
    list.append(5i32);
    assert_eq!(cursor.forward().unwrap(), Some(Slot::from(5i32)));
}

#[test]
fn test_cursor_sees_concurrent_appends_at_tail() {
    let list = filled(&[1]);
    let cursor = list.cursor();
    cursor.forward().unwrap();
    assert_eq!(cursor.forward().unwrap(), None);

    list.append(2i32);
    assert_eq!(cursor.forward().unwrap(), Some(Slot::from(2i32)));
}

#[test_log::test]
fn test_removed_node_makes_cursor_stale() {
    let list = filled(&[1, 2, 3]);
    let cursor = list.cursor();
    cursor.forward().unwrap();
    cursor.forward().unwrap();

    assert_eq!(list.remove(1).unwrap(), Slot::from(2i32));
    assert_eq!(cursor.forward(), Err(ListError::StaleCursor));
    assert_eq!(cursor.backward(), Err(ListError::StaleCursor));
    assert_eq!(cursor.current(), Err(ListError::StaleCursor));

    cursor.reset();
    assert_eq!(cursor.forward().unwrap(), Some(Slot::from(1i32)));
    assert_eq!(cursor.forward().unwrap(), Some(Slot::from(3i32)));
}

#[test]
fn test_recycled_node_is_still_stale() {
    let list = filled(&[1]);
    let cursor = list.cursor();
    cursor.forward().unwrap();

    // the arena hands the freed key to the next node
    list.pop();
    list.append(9i32);
    assert_eq!(cursor.forward(), Err(ListError::StaleCursor));
}

#[test]
fn test_clear_makes_cursor_stale() {
    let list = filled(&[1, 2]);
    let cursor = list.cursor();
    cursor.forward().unwrap();
    list.clear().unwrap();
    assert_eq!(cursor.current(), Err(ListError::StaleCursor));
}

#[test]
fn test_cursor_survives_neighbour_removal() {
    let list = filled(&[1, 2, 3, 4]);
    let cursor = list.cursor();
    cursor.forward().unwrap();
    cursor.forward().unwrap();

    list.pop();
    list.remove(1).unwrap();
    assert_eq!(cursor.current().unwrap(), Some(Slot::from(2i32)));
    assert_eq!(cursor.forward().unwrap(), Some(Slot::from(4i32)));
    assert_eq!(cursor.backward().unwrap(), Some(Slot::from(2i32)));
    assert_eq!(cursor.backward().unwrap(), None);
}

#[test]
fn test_cursor_follows_element_through_sort() {
    let list = ListBuilder::new().with_comparator(compare::int32).build();
    for v in [30i32, 10, 20] {
        list.append(v);
    }
    let cursor = list.cursor();
    cursor.forward().unwrap();

    list.sort();
    assert_eq!(cursor.current().unwrap(), Some(Slot::from(30i32)));
    assert_eq!(cursor.forward().unwrap(), None);
    assert_eq!(cursor.backward().unwrap(), Some(Slot::from(20i32)));
}

#[test]
fn test_independent_cursors() {
    let list = filled(&[1, 2, 3]);
    let first = list.cursor();
    let second = list.cursor();

    first.forward().unwrap();
    first.forward().unwrap();
    second.backward().unwrap();

    assert_eq!(first.current().unwrap(), Some(Slot::from(2i32)));
    assert_eq!(second.current().unwrap(), Some(Slot::from(3i32)));
    assert!(std::ptr::eq(first.list(), &list));
}

#[test]
fn test_cursor_debug_shows_position() {
    let list = filled(&[1]);
    let cursor = list.cursor();
    assert_eq!(format!("{:?}", cursor), "Cursor { position: Unset, .. }");

    cursor.forward().unwrap();
    assert!(format!("{:?}", cursor).starts_with("Cursor { position: At("));
}
