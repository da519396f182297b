use core::cell::RefCell;
use core::cmp::Ordering;
use core::fmt;
use core::mem;
use std::sync::Arc;

use crossbeam_utils::CachePadded;
use parking_lot::ReentrantMutex;
use tracing::{error, trace};

use crate::error::Result;
use crate::slot::Slot;

use super::config::{ListBuilder, ListConfig};
use super::iter::Cursor;
use super::raw::RawList;

/// A thread-safe doubly linked list of [`Slot`]s.
///
/// Every method takes `&self` and runs under the list's re-entrant lock, so a
/// list can be shared between threads behind an `Arc` and each call is
/// atomic with respect to the others. Use [`GenericList::with_lock`] to make
/// a sequence of calls atomic as a whole.
pub struct GenericList {
    config: Arc<ListConfig>,
    inner: CachePadded<ReentrantMutex<RefCell<RawList>>>,
}

impl GenericList {
    /// Creates a new, empty list with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ListConfig::default())
    }

    pub fn with_config(config: ListConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    fn with_shared_config(config: Arc<ListConfig>) -> Self {
        trace!(capacity = config.capacity(), "creating list");
        let raw = RawList::with_capacity(config.capacity());
        Self {
            config,
            inner: CachePadded::new(ReentrantMutex::new(RefCell::new(raw))),
        }
    }

    pub fn builder() -> ListBuilder {
        ListBuilder::new()
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&RawList) -> R) -> R {
        let guard = self.inner.lock();
        let raw = guard.borrow();
        f(&raw)
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut RawList) -> R) -> R {
        let guard = self.inner.lock();
        let mut raw = guard.borrow_mut();
        f(&mut raw)
    }

    /// Hold the list lock while `f` runs.
    ///
    /// The lock is re-entrant: `f` may call any method of this list, and no
    /// other thread can touch the list until `f` returns.
    ///
    /// Cursors take their own lock before the list lock, so `f` must not
    /// move a cursor that another thread may be using.
    ///
    /// # Examples
    ///
    /// ```
    /// use gll_collections::GenericList;
    ///
    /// let list = GenericList::new();
    /// list.append(1u8);
    /// let popped = list.with_lock(|list| {
    ///     if list.len() == 1 { list.pop() } else { None }
    /// });
    /// assert!(popped.is_some());
    /// ```
    pub fn with_lock<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        let _guard = self.inner.lock();
        f(self)
    }

    /// Append an element after the tail.
    pub fn append(&self, data: impl Into<Slot>) {
        let slot = data.into();
        self.write(|raw| raw.push_back(slot));
    }

    /// Push an element before the head.
    pub fn push(&self, data: impl Into<Slot>) {
        let slot = data.into();
        self.write(|raw| raw.push_front(slot));
    }

    /// Remove and return the head element.
    pub fn pop(&self) -> Option<Slot> {
        self.write(|raw| raw.pop_front())
    }

    /// Remove and return the tail element.
    pub fn trim(&self) -> Option<Slot> {
        self.write(|raw| raw.pop_back())
    }

    pub fn peek(&self) -> Option<Slot> {
        self.read(|raw| raw.front().cloned())
    }

    pub fn peek_last(&self) -> Option<Slot> {
        self.read(|raw| raw.back().cloned())
    }

    pub fn len(&self) -> usize {
        self.read(|raw| raw.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the element at `index`.
    pub fn get(&self, index: usize) -> Option<Slot> {
        self.read(|raw| raw.get(index).cloned())
    }

    /// Insert an element so that it ends up at `index`, shifting the
    /// element there and every one after it up by one.
    ///
    /// # Errors
    /// [`ListError::IndexOutOfRange`](crate::ListError::IndexOutOfRange) if `index > len`.
    pub fn insert(&self, index: usize, data: impl Into<Slot>) -> Result<()> {
        let slot = data.into();
        self.write(|raw| raw.insert(index, slot).map(drop))
    }

    /// Remove and return the element at `index`.
    ///
    /// # Errors
    /// [`ListError::IndexOutOfRange`](crate::ListError::IndexOutOfRange) if `index >= len`.
    pub fn remove(&self, index: usize) -> Result<Slot> {
        self.write(|raw| raw.remove(index))
    }

    /// Index of the first element the configured comparator reports equal
    /// to `data`.
    pub fn find(&self, data: impl Into<Slot>) -> Option<usize> {
        let data = data.into();
        self.read(|raw| raw.position(&data, &**self.config.comparator()))
    }

    /// Like [`GenericList::find`], with a one-off comparator.
    pub fn find_by<F>(&self, data: impl Into<Slot>, cmp: F) -> Option<usize>
    where
        F: Fn(&Slot, &Slot) -> Ordering,
    {
        let data = data.into();
        self.read(|raw| raw.position(&data, &cmp))
    }

    /// Stable sort with the configured comparator.
    pub fn sort(&self) {
        self.sort_by(|a, b| self.config.compare(a, b));
    }

    /// Stable sort with a one-off comparator.
    ///
    /// Cursors stay on the element they were on.
    pub fn sort_by<F>(&self, cmp: F)
    where
        F: Fn(&Slot, &Slot) -> Ordering,
    {
        self.write(|raw| {
            trace!(len = raw.len(), "sorting list");
            raw.sort_by(&cmp);
        });
    }

    /// Remove every element, running the deallocator on each non-zero slot.
    ///
    /// The deallocator runs after the nodes have been detached, still under
    /// the list lock, so it may call back into this list.
    ///
    /// # Errors
    /// [`ListError::Corrupted`](crate::ListError::Corrupted) if the node chain disagrees with the
    /// recorded length. Every element that could still be reached is
    /// released; the list must not be used afterwards.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.inner.lock();
        let drained = self.write(|raw| raw.drain());
        self.release(drained)
    }

    /// Clear the list and drop it.
    ///
    /// The nodes are moved out before they are released, so the drop that
    /// follows finds an empty list and reports nothing a second time.
    pub fn destroy(self) -> Result<()> {
        let mut raw = self.write(|raw| mem::replace(raw, RawList::with_capacity(0)));
        self.release(raw.drain())
    }

    fn release(&self, (slots, status): (Vec<Slot>, Result<()>)) -> Result<()> {
        trace!(released = slots.len(), "clearing list");

        for slot in slots {
            self.config.release(slot);
        }

        if let Err(err) = &status {
            error!(%err, "list structure corrupted while clearing");
        }
        status
    }

    /// Create a cursor positioned before the first element.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self)
    }

    /// Copy every slot into a vector, in list order.
    pub fn to_vec(&self) -> Vec<Slot> {
        self.read(|raw| raw.iter().cloned().collect())
    }

    /// Walk the whole chain and check the structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.read(|raw| raw.validate())
    }
}

impl Default for GenericList {
    fn default() -> Self {
        Self::new()
    }
}

/// A shallow copy: same configuration, same slot sequence, independent
/// nodes. Shared payloads are shared, not duplicated.
impl Clone for GenericList {
    fn clone(&self) -> Self {
        let list = Self::with_shared_config(Arc::clone(&self.config));
        self.read(|source| {
            list.write(|target| {
                for slot in source.iter() {
                    target.push_back(slot.clone());
                }
            })
        });
        list
    }
}

impl Drop for GenericList {
    fn drop(&mut self) {
        if let Err(err) = self.clear() {
            error!(%err, "failed to release list on drop");
        }
    }
}

impl fmt::Debug for GenericList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

impl<S: Into<Slot>> FromIterator<S> for GenericList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<S: Into<Slot>> Extend<S> for GenericList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.write(|raw| {
            for data in iter {
                raw.push_back(data.into());
            }
        });
    }
}

impl PartialEq for GenericList {
    /// Element-wise slot equality.
    fn eq(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        self.to_vec() == other.to_vec()
    }
}
