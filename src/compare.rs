//! Stock comparators for [`Slot`] payloads.
//!
//! Every comparator is a plain function that can be handed to
//! [`ListBuilder::with_comparator`](crate::linked_list::generic::ListBuilder::with_comparator)
//! or to the per-call `find_by`/`sort_by` methods. The numeric comparators
//! reinterpret the low bits of [`Slot::word`] at their own width, so e.g.
//! [`int32`] orders `I8`, `I16` and `I32` slots alike.

use core::cmp::Ordering;
use std::sync::Arc;

use crate::slot::Slot;

/// A total order over two slots.
pub type Comparator = Arc<dyn Fn(&Slot, &Slot) -> Ordering + Send + Sync>;

/// Orders slots by their raw storage word. This is the default ordering of
/// a list that was not configured with a comparator.
pub fn raw(a: &Slot, b: &Slot) -> Ordering {
    a.word().cmp(&b.word())
}

pub fn int32(a: &Slot, b: &Slot) -> Ordering {
    (a.word() as u32 as i32).cmp(&(b.word() as u32 as i32))
}

pub fn uint32(a: &Slot, b: &Slot) -> Ordering {
    (a.word() as u32).cmp(&(b.word() as u32))
}

/// Single precision ordering. Unordered pairs (NaN) compare equal.
pub fn float(a: &Slot, b: &Slot) -> Ordering {
    let a = f32::from_bits(a.word() as u32);
    let b = f32::from_bits(b.word() as u32);
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Double precision ordering. Unordered pairs (NaN) compare equal.
pub fn double(a: &Slot, b: &Slot) -> Ordering {
    let a = f64::from_bits(a.word());
    let b = f64::from_bits(b.word());
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Case-insensitive alphabetical ordering of text slots.
///
/// Non-text slots sort by their raw word, after all text slots.
pub fn alphabetical(a: &Slot, b: &Slot) -> Ordering {
    match (a.text(), b.text()) {
        (Some(a), Some(b)) => {
            let a = a.chars().flat_map(char::to_lowercase);
            let b = b.chars().flat_map(char::to_lowercase);
            a.cmp(b)
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => raw(a, b),
    }
}

/// Wrap a comparator function or closure for use in a list configuration.
pub fn comparator<F>(f: F) -> Comparator
where
    F: Fn(&Slot, &Slot) -> Ordering + Send + Sync + 'static,
{
    Arc::new(f)
}
