//! Thread-safe generic doubly linked lists.
//!
//! - [`slot`]: the type-tagged payload stored in every node.
//! - [`compare`]: stock comparators over slots.
//! - [`linked_list::generic`]: the list, its cursor and its configuration.

pub mod compare;
pub mod error;
pub mod linked_list;
pub mod slot;

pub use error::{ListError, Result};
pub use linked_list::generic::{Cursor, GenericList, ListBuilder, ListConfig};
pub use slot::{Slot, SlotValue};
