use crate::slot::Slot;

use super::traits::{Link, LinkWithPrev};

/// Position of a node inside its list's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey(usize);

impl NodeKey {
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub(crate) fn to_raw(self) -> usize {
        self.0
    }
}

/// A stable handle to one node of a list.
///
/// Arena keys are recycled once a node is freed, so a token also carries the
/// generation the node was created with. A token whose generation no longer
/// matches the node stored under its key refers to a removed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeToken {
    key: NodeKey,
    generation: u64,
}

impl NodeToken {
    pub(crate) fn key(&self) -> NodeKey {
        self.key
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

/// A node in a generic linked list.
pub(crate) struct Node {
    slot: Slot,
    next: Option<NodeKey>,
    prev: Option<NodeKey>,
    generation: u64,
}

impl Node {
    pub(crate) fn new(slot: Slot, generation: u64) -> Self {
        Self {
            slot,
            next: None,
            prev: None,
            generation,
        }
    }

    pub(crate) fn slot(&self) -> &Slot {
        &self.slot
    }

    pub(crate) fn into_slot(self) -> Slot {
        self.slot
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn token(&self, key: NodeKey) -> NodeToken {
        NodeToken {
            key,
            generation: self.generation,
        }
    }
}

impl Link for Node {
    fn next(&self) -> Option<NodeKey> {
        self.next
    }

    fn set_next(&mut self, next: Option<NodeKey>) {
        self.next = next;
    }
}

impl LinkWithPrev for Node {
    fn prev(&self) -> Option<NodeKey> {
        self.prev
    }

    fn set_prev(&mut self, prev: Option<NodeKey>) {
        self.prev = prev;
    }
}
