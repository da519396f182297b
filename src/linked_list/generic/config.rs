use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use crate::compare::{self, Comparator};
use crate::slot::Slot;

use super::list::GenericList;

/// A cleanup hook run on every non-zero slot when a list is cleared or
/// destroyed.
pub type Deallocator = Arc<dyn Fn(Slot) + Send + Sync>;

/// Immutable per-list configuration.
#[derive(Clone)]
pub struct ListConfig {
    comparator: Comparator,
    deallocator: Option<Deallocator>,
    capacity: usize,
}

impl ListConfig {
    /// The ordering used by `find` and `sort`.
    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    pub fn deallocator(&self) -> Option<&Deallocator> {
        self.deallocator.as_ref()
    }

    /// The number of nodes preallocated when the list is created.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn compare(&self, a: &Slot, b: &Slot) -> Ordering {
        (self.comparator)(a, b)
    }

    /// Run the deallocator, if any, on a slot leaving the list.
    pub(crate) fn release(&self, slot: Slot) {
        if let Some(deallocator) = &self.deallocator {
            if !slot.is_zero() {
                deallocator(slot);
            }
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        ListBuilder::new().build_config()
    }
}

impl fmt::Debug for ListConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListConfig")
            .field("deallocator", &self.deallocator.is_some())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

// Builder pattern support
pub struct ListBuilder {
    comparator: Option<Comparator>,
    deallocator: Option<Deallocator>,
    capacity: usize,
}

impl Default for ListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ListBuilder {
    /// Create a new builder with default settings.
    ///
    /// # Returns
    /// A builder that orders slots by their raw word and has no deallocator
    pub fn new() -> Self {
        Self {
            comparator: None,
            deallocator: None,
            capacity: 0,
        }
    }

    /// Set the comparator used by `find` and `sort`.
    ///
    /// # Arguments
    /// * `comparator` - A total order over two slots
    ///
    /// # Returns
    /// The builder instance for method chaining
    pub fn with_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Slot, &Slot) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    /// Set the comparator from an already shared one.
    pub fn with_shared_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Set the cleanup hook run on slots at clear/destroy time.
    ///
    /// # Arguments
    /// * `deallocator` - Called once per non-zero slot
    ///
    /// # Returns
    /// The builder instance for method chaining
    pub fn with_deallocator<F>(mut self, deallocator: F) -> Self
    where
        F: Fn(Slot) + Send + Sync + 'static,
    {
        self.deallocator = Some(Arc::new(deallocator));
        self
    }

    /// Set the number of nodes to preallocate.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Finish the configuration without creating a list.
    pub fn build_config(self) -> ListConfig {
        ListConfig {
            comparator: self
                .comparator
                .unwrap_or_else(|| compare::comparator(compare::raw)),
            deallocator: self.deallocator,
            capacity: self.capacity,
        }
    }

    /// Build the list.
    ///
    /// # Returns
    /// A new, empty list
    pub fn build(self) -> GenericList {
        GenericList::with_config(self.build_config())
    }
}
