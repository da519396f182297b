//! Linked list implementations.
//!
//! [`generic`] provides a thread-safe doubly linked list storing type-tagged
//! [`Slot`](crate::slot::Slot) payloads.
//!
//! # Examples
//!
//! ```
//! use gll_collections::compare;
//! use gll_collections::linked_list::generic::ListBuilder;
//!
//! let list = ListBuilder::new().with_comparator(compare::int32).build();
//! list.append(5i32);
//! list.append(2i32);
//! list.append(9i32);
//! list.append(1i32);
//!
//! assert_eq!(list.find(9i32), Some(2));
//! list.sort();
//! assert_eq!(list.find(9i32), Some(3));
//!
//! let values: Vec<i32> = list.to_vec().iter().filter_map(|s| s.decode()).collect();
//! assert_eq!(values, vec![1, 2, 5, 9]);
//! ```
pub mod generic;
