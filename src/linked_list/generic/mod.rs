//! # Generic Linked List
//!
//! A thread-safe doubly linked list whose elements are [`Slot`](crate::slot::Slot)s.
//!
//! ## Core Components
//!
//! - [`list::GenericList`]: the list handle. Every operation locks the list.
//! - [`iter::Cursor`]: a bidirectional cursor with its own lock.
//! - [`config::ListConfig`] and [`config::ListBuilder`]: per-list comparator,
//!   deallocator and capacity.
//! - `raw`: the unlocked core. Nodes live in a slab arena and refer to each
//!   other by arena key; `navigate` and `sort` extend it with indexed access
//!   and merge sort.
//!
//! ## Locking
//!
//! Each list is guarded by a re-entrant lock, each cursor by its own spin
//! lock. A cursor always takes its own lock first and the list lock second.
//!
//! Cursors hold a generation-stamped token rather than a reference to their
//! node. Removing the node a cursor sits on makes the cursor stale, which is
//! reported as [`ListError::StaleCursor`](crate::error::ListError::StaleCursor)
//! on its next use.

pub mod config;
pub mod iter;
pub mod list;

mod navigate;
mod node;
mod raw;
mod sort;
mod traits;

#[cfg(test)]
mod tests;

pub use config::{Deallocator, ListBuilder, ListConfig};
pub use iter::Cursor;
pub use list::GenericList;
