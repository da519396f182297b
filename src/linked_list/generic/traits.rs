use super::node::NodeKey;

/// A trait for a link in a linked list.
pub(crate) trait Link {
    /// Get the key of the next node in the linked list
    fn next(&self) -> Option<NodeKey>;

    /// Set the key of the next node in the linked list
    fn set_next(&mut self, next: Option<NodeKey>);
}

/// A trait for a link with a previous pointer.
pub(crate) trait LinkWithPrev: Link {
    /// Get the key of the previous node in the linked list
    fn prev(&self) -> Option<NodeKey>;

    /// Set the key of the previous node in the linked list
    fn set_prev(&mut self, prev: Option<NodeKey>);
}
